//! Inspect the effective configuration and where it comes from

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::{ConfigLoader, QelvesConfig};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration (user and project layers merged)
    Show,
    /// Show configuration file paths and whether each exists
    Path,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    let layers = ConfigLoader::layers();
    match args.command {
        ConfigCommands::Show => {
            let config = ConfigLoader::load()?;
            print!("{}", render_effective(&config, &layers)?);
        }
        ConfigCommands::Path => print!("{}", render_layers(&layers)),
    }
    Ok(())
}

/// Effective config as TOML, headed by the layers it was merged from
fn render_effective(config: &QelvesConfig, layers: &[(&str, PathBuf)]) -> Result<String> {
    let loaded: Vec<String> = layers
        .iter()
        .filter(|(_, path)| path.exists())
        .map(|(label, path)| format!("# {label}: {}\n", path.display()))
        .collect();

    let mut out = if loaded.is_empty() {
        "# no config files found, showing defaults\n".to_string()
    } else {
        loaded.concat()
    };
    out.push('\n');
    out.push_str(&toml::to_string_pretty(config)?);
    Ok(out)
}

fn render_layers(layers: &[(&str, PathBuf)]) -> String {
    layers
        .iter()
        .map(|(label, path)| format!("{label:<8} {} ({})\n", path.display(), status(path)))
        .collect()
}

fn status(path: &Path) -> &'static str {
    if path.is_file() { "found" } else { "missing" }
}
