use anyhow::Result;
use clap::Parser;
use stellar_inspect::cli::{init_logging, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    cli.run().await
}
