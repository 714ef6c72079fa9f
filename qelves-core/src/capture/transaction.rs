//! One captured request/response pair

use serde::{Deserialize, Serialize};

/// A single header as captured, duplicates allowed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Request body as captured
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedRequest {
    pub url: String,
    pub method: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub post_data: Option<PostData>,
    /// Inspector-assigned request id, when the host provides one
    #[serde(default)]
    pub id: Option<String>,
}

/// Response body as embedded in a HAR file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseContent {
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// `base64` for binary or compressed bodies
    #[serde(default)]
    pub encoding: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedResponse {
    /// `None` (or 0) when the transaction never completed
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub headers: Vec<Header>,
    /// Transport-reported body size; HAR uses -1 for "unknown"
    #[serde(default)]
    pub body_size: Option<f64>,
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

impl CapturedResponse {
    /// First header with the given name, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }
}

/// One captured HTTP transaction (a HAR entry)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub request: CapturedRequest,
    #[serde(default)]
    pub response: CapturedResponse,
    /// RFC 3339 start time
    #[serde(default)]
    pub started_date_time: String,
    /// Total elapsed time in milliseconds
    #[serde(default)]
    pub time: f64,
    /// Chrome's HAR extension carrying the inspector request id
    #[serde(default, rename = "_requestId", skip_serializing_if = "Option::is_none")]
    pub chrome_request_id: Option<String>,
}

impl Transaction {
    /// Request id reported by the host, if any
    pub fn host_request_id(&self) -> Option<&str> {
        self.request
            .id
            .as_deref()
            .or(self.chrome_request_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// Request MIME type, empty when there is no body
    pub fn request_mime_type(&self) -> &str {
        self.request
            .post_data
            .as_ref()
            .map(|p| p.mime_type.as_str())
            .unwrap_or_default()
    }

    /// Request body text, if any
    pub fn request_body(&self) -> Option<&str> {
        self.request.post_data.as_ref().and_then(|p| p.text.as_deref())
    }

    /// URL path without query string or fragment
    pub fn url_path(&self) -> &str {
        self.request
            .url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_har_entry() {
        let json = r#"{
            "startedDateTime": "2025-01-15T10:00:00.000Z",
            "time": 123.5,
            "_requestId": "1234.56",
            "request": {
                "method": "POST",
                "url": "https://api.example.com/graphql?x=1",
                "headers": [{"name": "Content-Type", "value": "application/json"}],
                "postData": {"mimeType": "application/json", "text": "{\"query\":\"{ x }\"}"}
            },
            "response": {
                "status": 200,
                "headers": [{"name": "Content-Length", "value": "17"}],
                "bodySize": -1,
                "content": {"size": 17, "mimeType": "application/json", "text": "{\"data\":{\"x\":1}}"}
            }
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.request.method, "POST");
        assert_eq!(tx.host_request_id(), Some("1234.56"));
        assert_eq!(tx.request_mime_type(), "application/json");
        assert_eq!(tx.url_path(), "https://api.example.com/graphql");
        assert_eq!(tx.response.status, Some(200));
        assert_eq!(tx.response.body_size, Some(-1.0));
        assert_eq!(tx.response.header("content-length"), Some("17"));
        assert_eq!(tx.time, 123.5);
    }

    #[test]
    fn request_id_prefers_inspector_id() {
        let tx = Transaction {
            request: CapturedRequest {
                id: Some("inspector-1".to_string()),
                ..Default::default()
            },
            chrome_request_id: Some("har-1".to_string()),
            ..Default::default()
        };
        assert_eq!(tx.host_request_id(), Some("inspector-1"));
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"request": {"method": "GET", "url": "https://x.test/graphql"}}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert!(tx.request.headers.is_empty());
        assert!(tx.request_body().is_none());
        assert_eq!(tx.request_mime_type(), "");
        assert!(tx.response.status.is_none());
        assert!(tx.host_request_id().is_none());
    }
}
