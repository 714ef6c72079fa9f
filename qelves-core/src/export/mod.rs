//! Export bundles
//!
//! A bundle is a self-contained JSON document describing selected events,
//! including a cURL command per request. Credential-bearing headers are
//! always redacted, in the header maps and in the cURL command alike.

pub mod curl;

use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tracing::info;

use crate::error::ExportError;
use crate::events::{HeaderMap, NetworkEvent};
use crate::graphql::GraphQLPayload;

pub use curl::{to_curl, to_curl_with_headers};

/// Replacement value for redacted headers
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Headers that are redacted from every export
pub const MANDATORY_REDACTED_HEADERS: [&str; 5] =
    ["authorization", "cookie", "x-api-key", "api-key", "set-cookie"];

pub const EXPORT_TOOL: &str = "GraphQeLves";
pub const EXPORT_VERSION: &str = "1.0";

/// Header redaction policy
///
/// Always covers [`MANDATORY_REDACTED_HEADERS`]; extra names can be added
/// but the mandatory ones cannot be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redaction {
    names: Vec<String>,
}

impl Default for Redaction {
    fn default() -> Self {
        Self {
            names: MANDATORY_REDACTED_HEADERS
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl Redaction {
    /// Mandatory headers plus `extra`
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut redaction = Self::default();
        for name in extra {
            let name = name.as_ref().trim().to_ascii_lowercase();
            if !name.is_empty() && !redaction.names.contains(&name) {
                redaction.names.push(name);
            }
        }
        redaction
    }

    pub fn is_redacted(&self, header: &str) -> bool {
        self.names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(header))
    }

    /// Copy of `headers` with sensitive values replaced, keys and order kept
    pub fn apply(&self, headers: &HeaderMap) -> HeaderMap {
        headers
            .iter()
            .map(|(name, value)| {
                let value = if self.is_redacted(name) {
                    REDACTION_MARKER.to_string()
                } else {
                    value.clone()
                };
                (name.clone(), value)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMeta {
    pub tool: String,
    pub version: String,
    /// RFC 3339
    pub exported_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedRequest {
    pub url: String,
    pub method: String,
    pub headers: HeaderMap,
    pub body: GraphQLPayload,
    pub curl: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Parsed JSON when available, otherwise the raw text
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedEvent {
    pub request: ExportedRequest,
    pub response: ExportedResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub meta: ExportMeta,
    pub events: Vec<ExportedEvent>,
}

impl ExportBundle {
    /// Bundle events with the mandatory redaction policy
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a NetworkEvent>) -> Self {
        Self::with_redaction(events, &Redaction::default())
    }

    pub fn with_redaction<'a>(
        events: impl IntoIterator<Item = &'a NetworkEvent>,
        redaction: &Redaction,
    ) -> Self {
        Self {
            meta: ExportMeta {
                tool: EXPORT_TOOL.to_string(),
                version: EXPORT_VERSION.to_string(),
                exported_at: Utc::now().to_rfc3339(),
            },
            events: events
                .into_iter()
                .map(|event| export_event(event, redaction))
                .collect(),
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, ExportError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the bundle, creating parent directories as needed
    pub async fn write_to(&self, path: &Path, pretty: bool) -> Result<(), ExportError> {
        let json = self.to_json(pretty)?;
        let write_error = |source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(write_error)?;
        }
        fs::write(path, json).await.map_err(write_error)?;

        info!(path = %path.display(), events = self.events.len(), "Wrote export bundle");
        Ok(())
    }
}

/// Default bundle file name, stamped with the current time
pub fn default_file_name() -> String {
    format!("graphqelves-export-{}.json", Utc::now().timestamp_millis())
}

fn export_event(event: &NetworkEvent, redaction: &Redaction) -> ExportedEvent {
    let body = match (&event.response_body_json, &event.response_body_raw) {
        (Some(json), _) if !json.is_null() => json.clone(),
        (_, Some(raw)) => Value::String(raw.clone()),
        _ => Value::Null,
    };

    let request_headers = redaction.apply(&event.request_headers);

    ExportedEvent {
        request: ExportedRequest {
            url: event.url.clone(),
            method: event.method.clone(),
            curl: to_curl_with_headers(event, &request_headers),
            headers: request_headers,
            body: event.graphql.clone(),
        },
        response: ExportedResponse {
            status: event.status.unwrap_or(0),
            headers: redaction.apply(&event.response_headers),
            body,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::OperationType;
    use serde_json::json;
    use tempfile::TempDir;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn event() -> NetworkEvent {
        NetworkEvent {
            id: "e1".to_string(),
            request_id: "r1".to_string(),
            timestamp: 0,
            url: "https://api.example.com/graphql".to_string(),
            method: "POST".to_string(),
            status: None,
            request_headers: headers(&[
                ("AUTHORIZATION", "Bearer secret"),
                ("Content-Type", "application/json"),
                ("Cookie", "sid=1"),
            ]),
            request_body_raw: Some(r#"{"query":"{ me }"}"#.to_string()),
            graphql: GraphQLPayload {
                operation_name: None,
                operation_type: OperationType::Query,
                query: Some("{ me }".to_string()),
                variables: None,
                extensions: None,
            },
            response_headers: headers(&[("Set-Cookie", "sid=2"), ("X-Api-Key", "k")]),
            response_body_raw: Some("not json".to_string()),
            response_body_json: None,
            response_size: 8,
            duration: 1.0,
            is_batched: false,
            batch_index: None,
        }
    }

    // ==================== Redaction Tests ====================

    #[test]
    fn mandatory_headers_are_redacted_in_any_case() {
        let bundle = ExportBundle::from_events([&event()]);
        let exported = &bundle.events[0];

        assert_eq!(exported.request.headers["AUTHORIZATION"], REDACTION_MARKER);
        assert_eq!(exported.request.headers["Cookie"], REDACTION_MARKER);
        assert_eq!(exported.request.headers["Content-Type"], "application/json");
        assert_eq!(exported.response.headers["Set-Cookie"], REDACTION_MARKER);
        assert_eq!(exported.response.headers["X-Api-Key"], REDACTION_MARKER);
    }

    #[test]
    fn extra_headers_extend_mandatory_set() {
        let redaction = Redaction::with_extra(["X-CSRF-Token", " "]);
        assert!(redaction.is_redacted("x-csrf-token"));
        assert!(redaction.is_redacted("Api-Key"));
        assert!(!redaction.is_redacted("accept"));
    }

    #[test]
    fn redaction_keeps_header_order() {
        let redacted = Redaction::default().apply(&event().request_headers);
        let keys: Vec<_> = redacted.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["AUTHORIZATION", "Content-Type", "Cookie"]);
    }

    // ==================== Bundle Tests ====================

    #[test]
    fn bundle_shape() {
        let bundle = ExportBundle::from_events([&event()]);
        let value = serde_json::to_value(&bundle).unwrap();

        assert_eq!(value["meta"]["tool"], "GraphQeLves");
        assert_eq!(value["meta"]["version"], "1.0");
        assert!(value["meta"]["exportedAt"].is_string());

        let exported = &value["events"][0];
        assert_eq!(exported["request"]["body"]["query"], "{ me }");
        assert!(exported["request"]["curl"].as_str().unwrap().starts_with("curl '"));
        assert_eq!(exported["response"]["status"], 0);
        assert_eq!(exported["response"]["body"], "not json");
    }

    #[test]
    fn serialized_bundle_carries_no_redacted_value() {
        let bundle = ExportBundle::from_events([&event()]);
        let json = bundle.to_json(false).unwrap();

        for secret in ["Bearer secret", "sid=1", "sid=2"] {
            assert!(!json.contains(secret), "bundle leaks {secret}");
        }
        let curl = &bundle.events[0].request.curl;
        assert!(curl.contains("-H 'AUTHORIZATION: [REDACTED]'"));
        assert!(curl.contains("-H 'Content-Type: application/json'"));
    }

    #[test]
    fn response_body_prefers_json() {
        let mut e = event();
        e.response_body_json = Some(json!({"data": {"me": null}}));
        let bundle = ExportBundle::from_events([&e]);
        assert_eq!(bundle.events[0].response.body, json!({"data": {"me": null}}));

        e.response_body_json = None;
        e.response_body_raw = None;
        let bundle = ExportBundle::from_events([&e]);
        assert!(bundle.events[0].response.body.is_null());
    }

    #[test]
    fn default_file_name_is_stamped() {
        let name = default_file_name();
        assert!(name.starts_with("graphqelves-export-"));
        assert!(name.ends_with(".json"));
    }

    #[tokio::test]
    async fn write_to_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("bundle.json");

        ExportBundle::from_events([&event()])
            .write_to(&path, true)
            .await
            .unwrap();

        let written: ExportBundle =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.events.len(), 1);
        assert_eq!(written.events[0].request.headers["Cookie"], REDACTION_MARKER);
    }
}
