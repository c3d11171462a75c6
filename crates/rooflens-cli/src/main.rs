//! Rooflens CLI - Property insight toolkit
//!
//! Usage:
//!   rooflens insight "123 Main St"   Generate (or fetch cached) insights
//!   rooflens serve --port 8080       Start the REST API server
//!   rooflens status                  Show configured backends

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Insight { address, json } => commands::cmd_insight(&address, json).await,
        Commands::Serve { host, port } => commands::cmd_serve(&host, port).await,
        Commands::Status => commands::cmd_status().await,
    }
}
