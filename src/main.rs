//! MDAN: Markdown-driven agent network for software delivery.
//!
//! This is the main entry point for the `mdan` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes.

mod cli;
mod commands;
pub mod agents;
pub mod clipboard;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod exit_codes;
pub mod flows;
pub mod fs;
pub mod orchestrator;
pub mod scaffold;
pub mod skills;
pub mod state;
pub mod tools;

use cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr and stay out of the way unless MDAN_LOG is set
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MDAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();

    match commands::dispatch(cli.command).await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
