//! GraphQL payload types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of GraphQL operation carried by a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
    /// Referenced by hash through `extensions.persistedQuery`
    Persisted,
    /// No query text to classify
    #[default]
    Unknown,
}

impl OperationType {
    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
            Self::Persisted => "persisted",
            Self::Unknown => "unknown",
        }
    }

    /// Parse from the lowercase wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "query" => Some(Self::Query),
            "mutation" => Some(Self::Mutation),
            "subscription" => Some(Self::Subscription),
            "persisted" => Some(Self::Persisted),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation found in a request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLPayload {
    /// Explicit name, or the name declared in the query text
    pub operation_name: Option<String>,
    pub operation_type: OperationType,
    /// Raw document text
    pub query: Option<String>,
    pub variables: Option<Map<String, Value>>,
    /// Carries persisted-query metadata when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl GraphQLPayload {
    /// Name for display, `None` for anonymous operations
    pub fn name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== OperationType Tests ====================

    #[test]
    fn operation_type_parse_round_trips_as_str() {
        for ty in [
            OperationType::Query,
            OperationType::Mutation,
            OperationType::Subscription,
            OperationType::Persisted,
            OperationType::Unknown,
        ] {
            assert_eq!(OperationType::parse(ty.as_str()), Some(ty));
        }
        assert_eq!(OperationType::parse("QUERY"), None);
    }

    #[test]
    fn operation_type_serializes_lowercase() {
        let json = serde_json::to_string(&OperationType::Subscription).unwrap();
        assert_eq!(json, "\"subscription\"");
    }

    // ==================== GraphQLPayload Tests ====================

    #[test]
    fn payload_serializes_camel_case_and_omits_missing_extensions() {
        let payload = GraphQLPayload {
            operation_name: Some("GetUser".to_string()),
            operation_type: OperationType::Query,
            query: Some("query GetUser { me { id } }".to_string()),
            variables: None,
            extensions: None,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["operationName"], "GetUser");
        assert_eq!(value["operationType"], "query");
        assert!(value["variables"].is_null());
        assert!(value.get("extensions").is_none());
    }
}
