//! List the GraphQL operations in a HAR capture

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::{ViewArgs, load_store, render};
use crate::config::ConfigLoader;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// HAR file to read
    pub har: PathBuf,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Print events as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let mut store = load_store(&args.har).await?;
    args.view.apply(&mut store, &config.view);
    render::print_view(&store, args.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use qelves_core::OperationFilter;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        list: ListArgs,
    }

    #[test]
    fn parse_list_with_view_flags() {
        let cli = TestCli::try_parse_from([
            "test",
            "capture.har",
            "--filter",
            "Mutation",
            "--search",
            "user",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.list.har, PathBuf::from("capture.har"));
        assert_eq!(cli.list.view.filter, Some(OperationFilter::Mutation));
        assert_eq!(cli.list.view.search.as_deref(), Some("user"));
        assert!(cli.list.json);
    }

    #[test]
    fn parse_list_minimal() {
        let cli = TestCli::try_parse_from(["test", "capture.har"]).unwrap();

        assert!(cli.list.view.filter.is_none());
        assert!(cli.list.view.search.is_none());
        assert!(!cli.list.json);
    }

    #[test]
    fn unknown_filter_is_rejected() {
        let result = TestCli::try_parse_from(["test", "capture.har", "--filter", "fragment"]);
        assert!(result.is_err());
    }

    #[test]
    fn har_path_is_required() {
        assert!(TestCli::try_parse_from(["test"]).is_err());
    }
}
