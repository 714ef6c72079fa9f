//! Show one captured operation in detail

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;

use super::{find_event, load_store, render};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// HAR file to read
    pub har: PathBuf,

    /// Event position (as printed by `list`) or event id
    pub event: String,
}

pub async fn run(args: ShowArgs) -> Result<()> {
    let store = load_store(&args.har).await?;

    let Some((index, event)) = find_event(&store, &args.event) else {
        bail!(
            "No event matches '{}' ({} events captured)",
            args.event,
            store.len()
        );
    };

    let batch_size = render::batch_sizes(store.events())
        .get(event.request_id.as_str())
        .copied()
        .unwrap_or(1);
    render::print_details(index + 1, event, batch_size)
}
