use anyhow::Result;
use clap::Parser;
use ipma_forecast::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    ipma_forecast::init_tracing();
    let cli = Cli::parse();
    ipma_forecast::run(cli).await
}
