//! Request body extraction
//!
//! Supports the two envelopes browsers actually send:
//!
//! - `application/json`: a single operation object, or an array of them (batching)
//! - `multipart/form-data`: the file-upload convention, where the operation
//!   object travels in a form field named `operations`
//!
//! Everything else, including JSON that fails to parse, is "not GraphQL".

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::classify::{classify, resolve_name};
use super::types::GraphQLPayload;

/// Keys whose presence marks an object as a GraphQL operation
const GRAPHQL_KEYS: [&str; 3] = ["query", "operationName", "extensions"];

/// The `operations` field of a multipart upload, up to the next line break
///
/// Deliberately narrow: no boundary parsing, CRLF line endings only.
static MULTIPART_OPERATIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"name="operations"\r\n\r\n([^\r\n]*)\r\n"#)
        .expect("multipart operations pattern is valid")
});

/// Body encoding, decided from the request MIME type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Multipart,
    Other,
}

impl BodyKind {
    fn from_mime_type(mime_type: &str) -> Self {
        let mime_type = mime_type.to_ascii_lowercase();
        if mime_type.contains("application/json") {
            Self::Json
        } else if mime_type.contains("multipart/form-data") {
            Self::Multipart
        } else {
            Self::Other
        }
    }
}

/// Whether a MIME type denotes a JSON body
pub fn is_json_mime_type(mime_type: &str) -> bool {
    BodyKind::from_mime_type(mime_type) == BodyKind::Json
}

/// Return the object if it carries at least one GraphQL key
pub fn looks_like_graphql(value: &Value) -> Option<&Map<String, Value>> {
    value
        .as_object()
        .filter(|object| GRAPHQL_KEYS.iter().any(|key| object.contains_key(*key)))
}

/// Extract every GraphQL operation carried by a request body
///
/// Returns `None` when the body is absent or carries no GraphQL. A returned
/// sequence is never empty; its length is the batch size.
pub fn extract(mime_type: &str, text: Option<&str>) -> Option<Vec<GraphQLPayload>> {
    let text = text.filter(|t| !t.is_empty())?;

    match BodyKind::from_mime_type(mime_type) {
        BodyKind::Json => extract_json(text),
        BodyKind::Multipart => extract_multipart(text),
        BodyKind::Other => {
            debug!(mime_type, "Body is neither JSON nor multipart");
            None
        }
    }
}

fn extract_json(text: &str) -> Option<Vec<GraphQLPayload>> {
    let json: Value = match serde_json::from_str(text) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Request body is not valid JSON");
            return None;
        }
    };

    match &json {
        // Batches may share a transport with unrelated objects (analytics
        // events), so the GraphQL test applies per element.
        Value::Array(items) => {
            let payloads: Vec<GraphQLPayload> = items
                .iter()
                .filter_map(looks_like_graphql)
                .map(to_payload)
                .collect();

            if payloads.is_empty() {
                debug!(items = items.len(), "JSON array holds no GraphQL operations");
                None
            } else {
                Some(payloads)
            }
        }
        single => looks_like_graphql(single).map(|object| vec![to_payload(object)]),
    }
}

fn extract_multipart(text: &str) -> Option<Vec<GraphQLPayload>> {
    let Some(operations) = MULTIPART_OPERATIONS_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
    else {
        debug!("Multipart body has no operations field");
        return None;
    };

    let json: Value = match serde_json::from_str(operations) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Failed to parse multipart GraphQL operations");
            return None;
        }
    };

    looks_like_graphql(&json).map(|object| vec![to_payload(object)])
}

fn to_payload(candidate: &Map<String, Value>) -> GraphQLPayload {
    GraphQLPayload {
        operation_name: resolve_name(candidate),
        operation_type: classify(candidate),
        query: candidate
            .get("query")
            .and_then(Value::as_str)
            .filter(|q| !q.is_empty())
            .map(str::to_string),
        variables: candidate.get("variables").and_then(Value::as_object).cloned(),
        extensions: candidate.get("extensions").and_then(Value::as_object).cloned(),
    }
}
