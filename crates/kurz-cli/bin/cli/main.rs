mod cli;
mod commands;

use crate::cli::{Command, CLI};
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CLI::parse();

    // One-shot commands keep stderr quiet unless something goes wrong.
    let default_directive = match cli.command {
        Some(Command::Run(_)) => "info",
        _ => "warn",
    };
    kurz_telemetry::init(default_directive);

    match commands::dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            debug!(error = ?e, "command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
