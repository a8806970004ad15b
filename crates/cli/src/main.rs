//! # Circuit Map CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Driver-vs-driver map generation from a session file
//! - Comparison config validation
//! - Session inspection

mod cli;
mod commands;
mod error;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_compare, run_info, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    observability::init_with_config(
        ObservabilityConfig {
            log_format: cli.log_format.into(),
            ..Default::default()
        }
        .with_verbosity(cli.verbose, cli.quiet),
    )?;

    info!(version = env!("CARGO_PKG_VERSION"), "Circuit Map CLI starting");

    let result = match &cli.command {
        Commands::Compare(args) => run_compare(args).await,
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}
