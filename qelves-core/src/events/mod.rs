//! Normalized network events

pub mod assembler;
pub mod types;

pub use assembler::{admit, assemble, build_events, headers_to_map, passes_gate, response_size};
pub use types::{HeaderMap, NetworkEvent};
