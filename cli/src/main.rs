//! Dormouse - stops services when the machine suspends and restarts them
//! on resume.

use std::process::ExitCode;

use clap::Parser;

use dormouse_cli::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
