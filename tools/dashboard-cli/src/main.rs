//! # Fantasy Dashboard
//!
//! Command-line front end for Sleeper league analytics.

mod cli;
mod logging;

use clap::Parser;
use colored::*;

use cli::{Cli, CliHandler};

async fn run(cli: Cli) -> anyhow::Result<()> {
    let handler = CliHandler::new(cli.json, cli.players_file).await?;
    handler.handle_command(cli.command).await
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    if let Err(e) = logging::initialize_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
