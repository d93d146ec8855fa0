//! Taxa CLI - Main entry point

use clap::Parser;
use std::process;
use taxa_cli::{Cli, Commands};
use taxa_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use tracing::error;

#[tokio::main]
async fn main() {
    // Pick up DATABASE_URL and friends from .env before clap reads the environment
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Verbose mode logs debug to the console; otherwise only warnings.
    // Logs go to stderr so stdout stays machine-readable.
    let log_config = LogConfig::builder()
        .level(if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        })
        .output(LogOutput::Console)
        .log_file_prefix("taxa-cli")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging
    let _guard = init_logging(&log_config).ok();

    if let Err(e) = execute_command(cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: Cli) -> taxa_cli::Result<()> {
    match cli.command {
        Commands::Resolve(args) => taxa_cli::commands::resolve::run(args).await,
        Commands::Ranks => taxa_cli::commands::ranks::run(),
    }
}
