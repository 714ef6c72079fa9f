//! Operation classification and name resolution
//!
//! Classification is an ordered chain of rules where the first match wins.
//! The order is load-bearing: the introspection check must precede the
//! prefix checks (introspection documents start with `query`), and the
//! `mutation`/`subscription` prefixes must precede the generic fallbacks.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::types::OperationType;

/// Operation name that is always reported as a query
const INTROSPECTION_OPERATION: &str = "IntrospectionQuery";

/// Leading `query|mutation|subscription <Name>` declaration
static DECLARED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:query|mutation|subscription)\s+([A-Za-z_][A-Za-z0-9_]*)")
        .expect("declared name pattern is valid")
});

/// A single predicate in the classification chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    /// Explicit `operationName` equal to `IntrospectionQuery`
    Introspection,
    /// Query text (leading whitespace trimmed) starts with the keyword
    Prefix(&'static str),
    /// `extensions.persistedQuery` is present and truthy
    PersistedQuery,
    /// Any query text at all
    HasQueryText,
}

/// Classification chain, evaluated top to bottom
const RULES: [(Rule, OperationType); 6] = [
    (Rule::Introspection, OperationType::Query),
    (Rule::Prefix("mutation"), OperationType::Mutation),
    (Rule::Prefix("subscription"), OperationType::Subscription),
    (Rule::PersistedQuery, OperationType::Persisted),
    (Rule::Prefix("query"), OperationType::Query),
    (Rule::HasQueryText, OperationType::Query),
];

impl Rule {
    fn matches(self, candidate: &Map<String, Value>) -> bool {
        match self {
            Rule::Introspection => {
                candidate.get("operationName").and_then(Value::as_str)
                    == Some(INTROSPECTION_OPERATION)
            }
            Rule::Prefix(keyword) => {
                query_text(candidate).is_some_and(|q| q.trim_start().starts_with(keyword))
            }
            Rule::PersistedQuery => candidate
                .get("extensions")
                .and_then(|ext| ext.get("persistedQuery"))
                .is_some_and(is_truthy),
            Rule::HasQueryText => query_text(candidate).is_some(),
        }
    }
}

/// Determine the operation kind of a candidate payload object
pub fn classify(candidate: &Map<String, Value>) -> OperationType {
    RULES
        .iter()
        .find(|(rule, _)| rule.matches(candidate))
        .map(|(_, operation_type)| *operation_type)
        .unwrap_or(OperationType::Unknown)
}

/// Resolve a display name for a candidate payload object
///
/// A non-empty explicit `operationName` wins; otherwise the name declared by
/// the query text's leading keyword is used. Anonymous operations yield `None`.
pub fn resolve_name(candidate: &Map<String, Value>) -> Option<String> {
    if let Some(name) = candidate
        .get("operationName")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
    {
        return Some(name.to_string());
    }

    let query = query_text(candidate)?;
    DECLARED_NAME_RE
        .captures(query)
        .and_then(|caps| caps.get(1))
        .map(|name| name.as_str().to_string())
}

fn query_text(candidate: &Map<String, Value>) -> Option<&str> {
    candidate.get("query").and_then(Value::as_str)
}

/// JavaScript-style truthiness, which is what clients use to flag persisted queries
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
