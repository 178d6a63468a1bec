use clap::Parser;
use yanggraph::{init_logging, run, Cli, LoggingConfig};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::from_env())?;
    let cli = Cli::parse();
    run(cli)
}
