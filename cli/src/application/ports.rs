//! Port trait definitions for the application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::config::MonitorConfig;
use crate::domain::error::ServiceError;
use crate::domain::service::ServiceStatus;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Service Manager Port ──────────────────────────────────────────────────────

/// The narrow contract this tool needs from the OS service manager: by-name
/// queries and fire-and-forget start/stop commands. Waiting for a status is
/// the caller's job ([`crate::application::handle::ServiceHandle`]), so test
/// doubles can model slow or stuck services without real clocks.
///
/// Returns the typed [`ServiceError`] taxonomy rather than `anyhow` so
/// callers can tell a refusal from a timeout from a missing service.
#[allow(async_fn_in_trait)]
pub trait ServiceManager {
    /// Current status of the named service, queried live.
    async fn query_status(&self, name: &str) -> Result<ServiceStatus, ServiceError>;

    /// Human-readable display name of the named service.
    async fn display_name(&self, name: &str) -> Result<String, ServiceError>;

    /// Issue a start command. Returns once the command is accepted; the
    /// service may still be `StartPending`.
    async fn send_start(&self, name: &str) -> Result<(), ServiceError>;

    /// Issue a stop command. Returns once the command is accepted.
    async fn send_stop(&self, name: &str) -> Result<(), ServiceError>;

    /// Names of the services this service depends on.
    async fn dependencies(&self, name: &str) -> Result<Vec<String>, ServiceError>;

    /// Names of the services that depend on this service.
    async fn dependents(&self, name: &str) -> Result<Vec<String>, ServiceError>;
}

// ── Event Log Port ────────────────────────────────────────────────────────────

/// Append-only line sink for the event log. Sync trait — no async needed.
///
/// Implementations must never fail the caller: a sink that cannot write
/// degrades to a no-op. Every state transition, user action, and failure
/// goes through here.
pub trait EventLog {
    /// Append one line to the log.
    fn append(&self, message: &str);
}

// ── Config Store Port ─────────────────────────────────────────────────────────

/// Abstracts loading of the startup watch configuration.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be read or parsed.
    fn load(&self) -> Result<MonitorConfig>;

    /// The path the configuration is read from.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be determined.
    fn path(&self) -> Result<std::path::PathBuf>;
}
