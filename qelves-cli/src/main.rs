use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "qelves", about = "Inspect GraphQL operations in captured network traffic")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List GraphQL operations in a HAR file
    List(commands::list::ListArgs),
    /// Show one operation in detail
    Show(commands::show::ShowArgs),
    /// Export operations to a redacted JSON bundle
    Export(commands::export::ExportArgs),
    /// Run synthetic GraphQL traffic through the pipeline
    Demo(commands::demo::DemoArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List(args) => commands::list::run(args).await,
        Commands::Show(args) => commands::show::run(args).await,
        Commands::Export(args) => commands::export::run(args).await,
        Commands::Demo(args) => commands::demo::run(args).await,
        Commands::Config(args) => commands::config::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["qelves", "list", "capture.har", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
