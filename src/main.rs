#![warn(clippy::all, clippy::pedantic)]

use anyhow::Result;
use clap::Parser;
use purgecron::Config;
use purgecron::cli::Cli;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = Config::load_or_init()?;
    purgecron::app::dispatch(cli, Arc::new(config)).await
}
