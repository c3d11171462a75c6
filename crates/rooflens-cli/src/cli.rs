//! CLI argument definitions

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rooflens",
    about = "Roof intelligence toolkit - property insights from an address",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate (or fetch cached) insights for a property address
    Insight {
        /// Property address to analyze
        address: String,

        /// Print the raw JSON record instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Start the REST API server
    Serve {
        /// Host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },

    /// Show configured backends and probe AI health
    Status,
}
