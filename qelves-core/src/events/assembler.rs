//! Event assembly
//!
//! Turns one captured transaction into zero or more [`NetworkEvent`]s. Assembly
//! never fails: anything malformed along the way means "no events" for that
//! transaction, so one bad request cannot stall the capture loop.

use chrono::DateTime;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use super::types::{HeaderMap, NetworkEvent};
use crate::capture::{CapturedResponse, Header, Transaction};
use crate::graphql::{GraphQLPayload, extract, is_json_mime_type};

/// Path suffix that marks an endpoint as GraphQL regardless of body type
const GRAPHQL_PATH_SUFFIX: &str = "/graphql";

/// Coarse relevance filter: a JSON body, or a `/graphql` endpoint
pub fn passes_gate(transaction: &Transaction) -> bool {
    is_json_mime_type(transaction.request_mime_type())
        || transaction.url_path().ends_with(GRAPHQL_PATH_SUFFIX)
}

/// Gate and extract the transaction's GraphQL operations
///
/// This is the synchronous half of capture; it needs only the request.
pub fn admit(transaction: &Transaction) -> Option<Vec<GraphQLPayload>> {
    let url = transaction.request.url.as_str();

    if !passes_gate(transaction) {
        debug!(url, "Skipping transaction: not JSON and not a GraphQL endpoint");
        return None;
    }

    let payloads = extract(transaction.request_mime_type(), transaction.request_body())
        .filter(|payloads| !payloads.is_empty());
    if payloads.is_none() {
        debug!(url, "Skipping transaction: no GraphQL payload");
    }
    payloads
}

/// Build events for already-extracted payloads once the response body is known
pub fn build_events(
    transaction: &Transaction,
    payloads: Vec<GraphQLPayload>,
    content: Option<String>,
) -> Vec<NetworkEvent> {
    let total = payloads.len();
    let is_batched = total > 1;

    let request_id = transaction
        .host_request_id()
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let timestamp = parse_timestamp(&transaction.started_date_time);
    let response_size = response_size(&transaction.response, content.as_deref());
    let response_body_json = content
        .as_deref()
        .and_then(|text| serde_json::from_str::<Value>(text).ok());
    let request_headers = headers_to_map(&transaction.request.headers);
    let response_headers = headers_to_map(&transaction.response.headers);
    let duration = if transaction.time.is_finite() && transaction.time > 0.0 {
        transaction.time
    } else {
        0.0
    };

    debug!(
        request_id = %request_id,
        url = %transaction.request.url,
        operations = total,
        "Assembling events"
    );

    payloads
        .into_iter()
        .enumerate()
        .map(|(index, graphql)| NetworkEvent {
            id: Uuid::new_v4().to_string(),
            request_id: request_id.clone(),
            timestamp,
            url: transaction.request.url.clone(),
            method: transaction.request.method.clone(),
            status: transaction.response.status.filter(|status| *status != 0),
            request_headers: request_headers.clone(),
            request_body_raw: transaction.request_body().map(str::to_string),
            graphql,
            response_headers: response_headers.clone(),
            response_body_raw: content.clone(),
            response_body_json: response_body_json.clone(),
            response_size,
            duration,
            is_batched,
            batch_index: is_batched.then_some(index),
        })
        .collect()
}

/// Assemble events for a transaction whose response body is already in hand
pub fn assemble(transaction: &Transaction, content: Option<&str>) -> Vec<NetworkEvent> {
    admit(transaction)
        .map(|payloads| build_events(transaction, payloads, content.map(str::to_string)))
        .unwrap_or_default()
}

/// Best-effort response size in bytes
///
/// Capture sources fill these fields inconsistently, so the first usable
/// value wins: reported body size, then `Content-Length`, then the decoded
/// body's byte length, then zero.
pub fn response_size(response: &CapturedResponse, content: Option<&str>) -> u64 {
    if let Some(size) = response
        .body_size
        .filter(|size| size.is_finite() && *size >= 1.0)
    {
        return size as u64;
    }

    if let Some(length) = response
        .header("content-length")
        .and_then(parse_leading_integer)
        .filter(|length| *length > 0)
    {
        return length;
    }

    content.map(|text| text.len() as u64).unwrap_or(0)
}

/// Fold captured headers into a map; later duplicates overwrite earlier ones
pub fn headers_to_map(headers: &[Header]) -> HeaderMap {
    headers.iter().fold(HeaderMap::new(), |mut map, header| {
        map.insert(header.name.clone(), header.value.clone());
        map
    })
}

/// Leading decimal digits of a header value (`"42; x"` is 42)
fn parse_leading_integer(value: &str) -> Option<u64> {
    let trimmed = value.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

fn parse_timestamp(started: &str) -> i64 {
    match DateTime::parse_from_rfc3339(started) {
        Ok(at) => at.timestamp_millis(),
        Err(e) => {
            warn!(started, error = %e, "Unparseable transaction start time");
            0
        }
    }
}
