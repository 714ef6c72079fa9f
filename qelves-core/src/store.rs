//! Event store
//!
//! An append-only list of captured events plus the view state layered on top
//! of it: a multi-selection, an operation-type filter and a search string.
//! Selection and filtering are independent. Hiding an event with a filter
//! does not deselect it.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::events::NetworkEvent;
use crate::graphql::OperationType;

/// Operation-type filter applied to the visible list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OperationFilter {
    #[default]
    All,
    Query,
    Mutation,
    Subscription,
    Persisted,
}

impl OperationFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
            Self::Persisted => "persisted",
        }
    }

    /// Whether an operation of this type is visible under the filter
    pub fn matches(&self, operation_type: OperationType) -> bool {
        match self {
            Self::All => true,
            Self::Query => operation_type == OperationType::Query,
            Self::Mutation => operation_type == OperationType::Mutation,
            Self::Subscription => operation_type == OperationType::Subscription,
            Self::Persisted => operation_type == OperationType::Persisted,
        }
    }
}

impl std::fmt::Display for OperationFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown operation filter '{0}' (expected all, query, mutation, subscription or persisted)")]
pub struct ParseFilterError(String);

impl FromStr for OperationFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "query" => Ok(Self::Query),
            "mutation" => Ok(Self::Mutation),
            "subscription" => Ok(Self::Subscription),
            "persisted" => Ok(Self::Persisted),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

/// Modifier keys held during a row click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickModifiers {
    /// Extend the selection from the last-clicked row
    pub shift: bool,
    /// Add to the selection (Cmd/Ctrl)
    pub multi: bool,
}

/// Ordered event collection with selection and view state
///
/// Selection only ever refers to events currently in the collection: ids that
/// are not in the store are ignored, and [`EventStore::clear`] drops the
/// selection together with the events.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<NetworkEvent>,
    /// Ids of `events`, for membership checks
    known_ids: HashSet<String>,
    selected: HashSet<String>,
    filter: OperationFilter,
    search_query: String,
    /// Last clicked id, the anchor for shift-click ranges
    anchor: Option<String>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Collection ====================

    /// Append an event; batched events sharing a request id stay distinct rows
    pub fn append(&mut self, event: NetworkEvent) {
        self.known_ids.insert(event.id.clone());
        self.events.push(event);
    }

    /// Append events in order
    pub fn extend(&mut self, events: impl IntoIterator<Item = NetworkEvent>) {
        for event in events {
            self.append(event);
        }
    }

    /// Remove every event and the selection that referred to them
    pub fn clear(&mut self) {
        let cleared = self.events.len();
        self.events.clear();
        self.known_ids.clear();
        self.selected.clear();
        self.anchor = None;
        if cleared > 0 {
            info!(cleared, "Cleared event store");
        }
    }

    /// All events in append order
    pub fn events(&self) -> &[NetworkEvent] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&NetworkEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    // ==================== Selection ====================

    /// Selection becomes exactly `{id}`
    pub fn select_single(&mut self, id: &str) {
        if !self.contains(id) {
            return;
        }
        self.selected.clear();
        self.selected.insert(id.to_string());
    }

    /// Add `id` to the selection, keeping the rest
    pub fn select_toggle_add(&mut self, id: &str) {
        if self.contains(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Add every id in `ids` to the selection
    pub fn select_range<S: AsRef<str>>(&mut self, ids: &[S]) {
        for id in ids {
            self.select_toggle_add(id.as_ref());
        }
    }

    /// Flip membership of `id`, leaving other selected ids untouched
    pub fn toggle(&mut self, id: &str) {
        if !self.selected.remove(id) && self.contains(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Apply a row click with the given modifiers
    ///
    /// Shift extends from the previous click across the visible ordering;
    /// when either end of that range is not visible, the clicked row is added
    /// instead. The clicked row becomes the next anchor.
    pub fn click(&mut self, id: &str, modifiers: ClickModifiers) {
        if !self.contains(id) {
            return;
        }

        match (modifiers.shift, self.anchor.clone()) {
            (true, Some(anchor)) => match self.visible_range(&anchor, id) {
                Some(range) => self.select_range(&range),
                None => self.select_toggle_add(id),
            },
            _ if modifiers.multi => self.select_toggle_add(id),
            _ => self.select_single(id),
        }

        self.anchor = Some(id.to_string());
    }

    /// Ids between two visible events, inclusive, in visible order
    ///
    /// `None` when either endpoint is hidden by the current filter or search.
    pub fn visible_range(&self, from: &str, to: &str) -> Option<Vec<String>> {
        let visible: Vec<&NetworkEvent> = self.filtered().collect();
        let start = visible.iter().position(|event| event.id == from)?;
        let end = visible.iter().position(|event| event.id == to)?;
        let (low, high) = if start <= end { (start, end) } else { (end, start) };

        Some(
            visible[low..=high]
                .iter()
                .map(|event| event.id.clone())
                .collect(),
        )
    }

    pub fn selected_ids(&self) -> &HashSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Selected events in append order, including ones hidden by the filter
    pub fn selected_events(&self) -> Vec<&NetworkEvent> {
        self.events
            .iter()
            .filter(|event| self.selected.contains(&event.id))
            .collect()
    }

    // ==================== View ====================

    pub fn set_filter(&mut self, filter: OperationFilter) {
        self.filter = filter;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn filter(&self) -> OperationFilter {
        self.filter
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Events visible under the current filter and search, in append order
    pub fn filtered(&self) -> impl Iterator<Item = &NetworkEvent> + '_ {
        let needle = self.search_query.to_lowercase();
        self.events.iter().filter(move |event| {
            self.filter.matches(event.operation_type()) && matches_search(event, &needle)
        })
    }

    fn contains(&self, id: &str) -> bool {
        self.known_ids.contains(id)
    }
}

/// Case-insensitive substring match on operation name or URL
fn matches_search(event: &NetworkEvent, needle: &str) -> bool {
    needle.is_empty()
        || event
            .operation_name()
            .is_some_and(|name| name.to_lowercase().contains(needle))
        || event.url.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::HeaderMap;
    use crate::graphql::GraphQLPayload;

    fn event(id: &str, name: Option<&str>, operation_type: OperationType) -> NetworkEvent {
        NetworkEvent {
            id: id.to_string(),
            request_id: format!("req-{id}"),
            timestamp: 0,
            url: "https://api.example.com/graphql".to_string(),
            method: "POST".to_string(),
            status: Some(200),
            request_headers: HeaderMap::new(),
            request_body_raw: None,
            graphql: GraphQLPayload {
                operation_name: name.map(str::to_string),
                operation_type,
                query: None,
                variables: None,
                extensions: None,
            },
            response_headers: HeaderMap::new(),
            response_body_raw: None,
            response_body_json: None,
            response_size: 0,
            duration: 0.0,
            is_batched: false,
            batch_index: None,
        }
    }

    fn store_abcd() -> EventStore {
        let mut store = EventStore::new();
        store.append(event("a", Some("GetUser"), OperationType::Query));
        store.append(event("b", Some("SaveUser"), OperationType::Mutation));
        store.append(event("c", Some("ListPosts"), OperationType::Query));
        store.append(event("d", None, OperationType::Subscription));
        store
    }

    fn ids<'a>(events: impl Iterator<Item = &'a NetworkEvent>) -> Vec<&'a str> {
        events.map(|e| e.id.as_str()).collect()
    }

    fn selected(store: &EventStore) -> Vec<&str> {
        ids(store.selected_events().into_iter())
    }

    // ==================== Collection Tests ====================

    #[test]
    fn append_preserves_order_and_keeps_duplicates() {
        let mut store = store_abcd();
        store.append(event("a", Some("GetUser"), OperationType::Query));

        assert_eq!(ids(store.events().iter()), vec!["a", "b", "c", "d", "a"]);
        assert_eq!(ids(store.filtered()), vec!["a", "b", "c", "d", "a"]);
    }

    #[test]
    fn clear_empties_events_and_selection() {
        let mut store = store_abcd();
        store.select_range(&["a", "b"]);
        store.clear();

        assert!(store.is_empty());
        assert!(store.selected_ids().is_empty());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut store = store_abcd();
        store.select_single("c");
        store.clear();
        store.clear();

        assert!(store.is_empty());
        assert!(store.selected_ids().is_empty());
    }

    #[test]
    fn cleared_ids_cannot_be_selected() {
        let mut store = store_abcd();
        store.clear();
        store.select_single("a");
        store.toggle("b");

        assert!(store.selected_ids().is_empty());
    }

    // ==================== Selection Tests ====================

    #[test]
    fn select_single_replaces_selection() {
        let mut store = store_abcd();
        store.select_range(&["a", "b"]);
        store.select_single("c");

        assert_eq!(selected(&store), vec!["c"]);
    }

    #[test]
    fn select_toggle_add_keeps_others() {
        let mut store = store_abcd();
        store.select_single("a");
        store.select_toggle_add("c");
        store.select_toggle_add("c");

        assert_eq!(selected(&store), vec!["a", "c"]);
    }

    #[test]
    fn toggle_flips_only_target() {
        let mut store = store_abcd();
        store.select_range(&["a", "b"]);
        store.toggle("a");
        store.toggle("d");

        assert_eq!(selected(&store), vec!["b", "d"]);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut store = store_abcd();
        store.select_single("a");
        store.select_single("zzz");
        store.select_range(&["b", "zzz"]);

        assert_eq!(selected(&store), vec!["a", "b"]);
    }

    #[test]
    fn shift_click_selects_visible_range() {
        let mut store = store_abcd();
        store.click("b", ClickModifiers::default());
        store.click(
            "d",
            ClickModifiers {
                shift: true,
                multi: false,
            },
        );

        assert_eq!(store.visible_range("b", "d").unwrap(), vec!["b", "c", "d"]);
        assert_eq!(selected(&store), vec!["b", "c", "d"]);
    }

    #[test]
    fn shift_click_range_is_order_independent() {
        let mut store = store_abcd();
        store.click("d", ClickModifiers::default());
        store.click(
            "a",
            ClickModifiers {
                shift: true,
                multi: false,
            },
        );

        assert_eq!(selected(&store), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn shift_click_adds_to_existing_selection() {
        let mut store = store_abcd();
        store.select_single("a");
        store.select_toggle_add("d");
        store.anchor = Some("b".to_string());
        store.click(
            "c",
            ClickModifiers {
                shift: true,
                multi: false,
            },
        );

        assert_eq!(selected(&store), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn shift_click_with_hidden_anchor_adds_clicked_only() {
        let mut store = store_abcd();
        store.click("b", ClickModifiers::default());
        store.set_filter(OperationFilter::Query);
        store.click(
            "c",
            ClickModifiers {
                shift: true,
                multi: false,
            },
        );

        assert!(store.visible_range("b", "c").is_none());
        assert_eq!(selected(&store), vec!["b", "c"]);
    }

    #[test]
    fn shift_click_without_anchor_is_plain_click() {
        let mut store = store_abcd();
        store.select_toggle_add("a");
        store.click(
            "c",
            ClickModifiers {
                shift: true,
                multi: false,
            },
        );

        assert_eq!(selected(&store), vec!["c"]);
    }

    #[test]
    fn multi_click_adds() {
        let mut store = store_abcd();
        store.click("a", ClickModifiers::default());
        store.click(
            "c",
            ClickModifiers {
                shift: false,
                multi: true,
            },
        );

        assert_eq!(selected(&store), vec!["a", "c"]);
    }

    #[test]
    fn clear_drops_anchor() {
        let mut store = store_abcd();
        store.click("a", ClickModifiers::default());
        store.clear();
        store.extend([
            event("a", None, OperationType::Query),
            event("b", None, OperationType::Query),
        ]);
        store.click(
            "b",
            ClickModifiers {
                shift: true,
                multi: false,
            },
        );

        assert_eq!(selected(&store), vec!["b"]);
    }

    // ==================== View Tests ====================

    #[test]
    fn filter_by_operation_type() {
        let mut store = store_abcd();
        store.set_filter(OperationFilter::Query);
        assert_eq!(ids(store.filtered()), vec!["a", "c"]);

        store.set_filter(OperationFilter::Persisted);
        assert!(store.filtered().next().is_none());
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let mut store = store_abcd();
        store.set_search_query("USER");
        assert_eq!(ids(store.filtered()), vec!["a", "b"]);
    }

    #[test]
    fn search_matches_url() {
        let mut store = store_abcd();
        store.append(NetworkEvent {
            url: "https://other.test/api".to_string(),
            ..event("e", None, OperationType::Query)
        });
        store.set_search_query("other.test");
        assert_eq!(ids(store.filtered()), vec!["e"]);
    }

    #[test]
    fn filter_and_search_combine() {
        let mut store = store_abcd();
        store.set_filter(OperationFilter::Query);
        store.set_search_query("posts");
        assert_eq!(ids(store.filtered()), vec!["c"]);
    }

    #[test]
    fn filtering_does_not_change_selection() {
        let mut store = store_abcd();
        store.select_range(&["a", "b"]);
        store.set_filter(OperationFilter::Mutation);
        store.set_search_query("nothing matches");

        assert_eq!(selected(&store), vec!["a", "b"]);
    }

    // ==================== OperationFilter Tests ====================

    #[test]
    fn filter_parses_case_insensitively() {
        assert_eq!(
            "Mutation".parse::<OperationFilter>(),
            Ok(OperationFilter::Mutation)
        );
        assert_eq!("all".parse::<OperationFilter>(), Ok(OperationFilter::All));
        assert!("unknown".parse::<OperationFilter>().is_err());
    }

    #[test]
    fn all_filter_matches_unknown_operations() {
        assert!(OperationFilter::All.matches(OperationType::Unknown));
        assert!(!OperationFilter::Query.matches(OperationType::Unknown));
    }
}
