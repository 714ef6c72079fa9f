//! Write selected operations to a redacted export bundle

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use qelves_core::export::default_file_name;
use qelves_core::{EventStore, ExportBundle, Redaction};

use super::{ViewArgs, find_event, load_store};
use crate::config::{ConfigLoader, QelvesConfig};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// HAR file to read
    pub har: PathBuf,

    /// Events to export, by position or id (defaults to every visible event)
    #[arg(long = "select", value_name = "ID|INDEX", value_delimiter = ',')]
    pub select: Vec<String>,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Output file (defaults to the configured export directory)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub async fn run(args: ExportArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let mut store = load_store(&args.har).await?;
    args.view.apply(&mut store, &config.view);

    select(&mut store, &args.select)?;
    if store.selected_ids().is_empty() {
        bail!("Nothing to export: no events selected");
    }

    let bundle = build_bundle(&store, &config);
    let path = args
        .out
        .unwrap_or_else(|| config.export.directory.join(default_file_name()));
    bundle
        .write_to(&path, config.export.pretty)
        .await
        .with_context(|| format!("Failed to export to {}", path.display()))?;

    println!(
        "Exported {} operation(s) to {}",
        bundle.events.len(),
        path.display()
    );
    Ok(())
}

/// Select the requested events, or everything visible when none are named
fn select(store: &mut EventStore, keys: &[String]) -> Result<()> {
    if keys.is_empty() {
        let visible: Vec<String> = store.filtered().map(|event| event.id.clone()).collect();
        store.select_range(&visible);
        return Ok(());
    }

    for key in keys {
        let id = find_event(store, key)
            .map(|(_, event)| event.id.clone())
            .ok_or_else(|| anyhow!("No event matches '{key}'"))?;
        store.select_toggle_add(&id);
    }
    Ok(())
}

fn build_bundle(store: &EventStore, config: &QelvesConfig) -> ExportBundle {
    let redaction = Redaction::with_extra(&config.export.extra_redacted_headers);
    ExportBundle::with_redaction(store.selected_events(), &redaction)
}
