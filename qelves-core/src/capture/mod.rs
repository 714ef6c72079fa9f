//! Captured HTTP traffic
//!
//! The shapes handed to us by the browser's network inspector. They follow
//! HAR 1.2 entries, so exported `.har` files load without translation.

pub mod har;
pub mod source;
pub mod transaction;

pub use har::{Har, HarLog};
pub use source::{ContentSource, FetchedContent};
pub use transaction::{CapturedRequest, CapturedResponse, Header, PostData, ResponseContent, Transaction};
