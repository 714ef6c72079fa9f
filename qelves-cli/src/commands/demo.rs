//! Run synthetic traffic through the capture pipeline

use anyhow::Result;
use clap::Args;
use clap::builder::RangedU64ValueParser;
use qelves_core::{EventStore, demo, monitor};

use super::{ViewArgs, render};
use crate::config::ConfigLoader;

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Number of transactions to generate
    #[arg(
        short,
        long,
        default_value_t = 10,
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=demo::MAX_TRANSACTIONS as u64)
    )]
    pub count: usize,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Print events as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: DemoArgs) -> Result<()> {
    let config = ConfigLoader::load()?;

    let mut store = EventStore::new();
    monitor::ingest(&demo::transactions(args.count), &mut store).await;
    args.view.apply(&mut store, &config.view);

    render::print_view(&store, args.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        demo: DemoArgs,
    }

    #[test]
    fn parse_demo_defaults() {
        let cli = TestCli::try_parse_from(["test"]).unwrap();
        assert_eq!(cli.demo.count, 10);
        assert!(!cli.demo.json);
    }

    #[test]
    fn parse_demo_count() {
        let cli = TestCli::try_parse_from(["test", "--count", "3", "--json"]).unwrap();
        assert_eq!(cli.demo.count, 3);
        assert!(cli.demo.json);
    }

    #[test]
    fn count_above_cap_is_rejected() {
        let at_cap = demo::MAX_TRANSACTIONS.to_string();
        let above_cap = (demo::MAX_TRANSACTIONS + 1).to_string();

        assert!(TestCli::try_parse_from(["test", "--count", at_cap.as_str()]).is_ok());
        assert!(TestCli::try_parse_from(["test", "--count", above_cap.as_str()]).is_err());
        assert!(TestCli::try_parse_from(["test", "--count", "18446744073709551615"]).is_err());
    }

    #[test]
    fn negative_count_is_rejected() {
        assert!(TestCli::try_parse_from(["test", "--count", "-1"]).is_err());
    }
}
