use anyhow::Result;
use clap::Parser;

use commander::cli::Cli;
use commander::server;

#[tokio::main]
async fn main() -> Result<()> {
    server::init_tracing();
    let cli = Cli::parse();

    server::run(cli).await
}
