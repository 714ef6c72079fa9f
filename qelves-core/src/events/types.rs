//! Event type definitions

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::graphql::{GraphQLPayload, OperationType};

/// Header name to value, in capture order
pub type HeaderMap = IndexMap<String, String>;

/// One GraphQL operation observed on the wire
///
/// Batched transactions produce one event per operation; those events share
/// `request_id` but never `id`. Events are immutable once assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEvent {
    pub id: String,
    pub request_id: String,
    /// Transaction start, epoch milliseconds
    pub timestamp: i64,
    pub url: String,
    pub method: String,
    pub status: Option<u16>,

    pub request_headers: HeaderMap,
    pub request_body_raw: Option<String>,
    pub graphql: GraphQLPayload,

    pub response_headers: HeaderMap,
    pub response_body_raw: Option<String>,
    pub response_body_json: Option<Value>,
    /// Bytes, best effort
    pub response_size: u64,
    /// Milliseconds
    pub duration: f64,

    pub is_batched: bool,
    /// Position within the batch, only set when batched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_index: Option<usize>,
}

impl NetworkEvent {
    pub fn operation_type(&self) -> OperationType {
        self.graphql.operation_type
    }

    pub fn operation_name(&self) -> Option<&str> {
        self.graphql.name()
    }
}
