//! GraphQL payload detection
//!
//! Turns a captured request body into zero or more [`GraphQLPayload`]s.
//! Nothing here validates GraphQL syntax; detection is a best-effort look at
//! the JSON envelope clients put around their operations.

pub mod classify;
pub mod extract;
pub mod types;

pub use classify::{classify, resolve_name};
pub use extract::{extract, is_json_mime_type, looks_like_graphql};
pub use types::{GraphQLPayload, OperationType};
