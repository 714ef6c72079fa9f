pub mod config;
pub mod demo;
pub mod export;
pub mod list;
pub mod show;

mod render;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use qelves_core::{EventStore, Har, NetworkEvent, OperationFilter, monitor};
use tracing::info;

use crate::config::ViewConfig;

/// Filter and search flags shared by commands that work on the visible list
#[derive(Debug, Default, Args)]
pub struct ViewArgs {
    /// Only show one operation kind (all, query, mutation, subscription, persisted)
    #[arg(short, long)]
    pub filter: Option<OperationFilter>,

    /// Case-insensitive match on operation name or URL
    #[arg(short, long)]
    pub search: Option<String>,
}

impl ViewArgs {
    /// Apply flags to the store, falling back to configured defaults
    pub fn apply(&self, store: &mut EventStore, defaults: &ViewConfig) {
        store.set_filter(self.filter.unwrap_or(defaults.filter));
        let search = self.search.as_ref().or(defaults.search.as_ref());
        store.set_search_query(search.cloned().unwrap_or_default());
    }
}

/// Load a HAR file and run every entry through the capture pipeline
pub async fn load_store(path: &Path) -> Result<EventStore> {
    let har = Har::load(path)
        .await
        .with_context(|| format!("Failed to load HAR file {}", path.display()))?;

    let mut store = EventStore::new();
    let report = monitor::ingest_har(&har, &mut store).await;
    info!(
        path = %path.display(),
        transactions = report.transactions,
        captured = report.captured,
        events = report.events,
        "Loaded capture"
    );
    Ok(store)
}

/// Find an event by 1-based position in the store or by id
pub fn find_event<'a>(store: &'a EventStore, key: &str) -> Option<(usize, &'a NetworkEvent)> {
    if let Ok(position) = key.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| store.events().get(index).map(|event| (index, event)));
    }
    store
        .events()
        .iter()
        .enumerate()
        .find(|(_, event)| event.id == key)
}
