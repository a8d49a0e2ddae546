use clap::Parser;
use rpcroute::cli::{run_cli, Cli};

fn main() -> anyhow::Result<()> {
    rpcroute::logging::init_logging()?;
    let cli = Cli::parse();
    run_cli(&cli)
}
