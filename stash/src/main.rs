use clap::Parser;
use stash_config::StashConfig;
use stash_core::master::Master;
use tracing::warn;
use utils::init_tracing;

mod cli;

use cli::{Cli, Command, StartArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Start(args) => start(args).await,
    }
}

async fn start(args: StartArgs) -> anyhow::Result<()> {
    let cfg = match StashConfig::from_file(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error reading {}: {e}", args.config);
            eprintln!("Continuing with default configuration...");
            StashConfig::default()
        }
    }
    .with_overrides(args.port, args.origin);

    let report = cfg.validate();
    if report.has_errors() {
        eprintln!("{}", report.format());
        eprintln!("Use --help or -h for usage information.");
        std::process::exit(1);
    }

    init_tracing(cfg.global.log_level());
    for warning in report.warnings() {
        warn!(target: "stash::config", "{warning}");
    }
    cfg.print();

    Master::new(cfg).run().await
}
