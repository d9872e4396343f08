//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Stops services when the machine suspends and restarts them on resume
#[derive(Parser)]
#[command(
    name = "dormouse",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Watch power events, stopping/starting registered services
    Run(commands::run::RunArgs),

    /// Show registered services and their live status
    Status(commands::status::StatusArgs),

    /// Start resume-registered services, or one named service
    Start(commands::start::StartArgs),

    /// Stop suspend-registered services, or one named service
    Stop(commands::stop::StopArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if startup (config, registry) or the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli { json, quiet, no_color, command } = self;
        let flags = AppFlags { no_color, quiet };
        match command {
            Command::Version => {
                commands::version::run(json);
                Ok(ExitCode::SUCCESS)
            }
            Command::Run(args) => commands::run::run(&AppContext::new(&flags)?, &args).await,
            Command::Status(args) => {
                commands::status::run(&AppContext::new(&flags)?, json, &args).await
            }
            Command::Start(args) => commands::start::run(&AppContext::new(&flags)?, &args).await,
            Command::Stop(args) => commands::stop::run(&AppContext::new(&flags)?, &args).await,
        }
    }
}
