//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator. Individual service failures are
//! never fatal: batch callers collect them and keep going.

use thiserror::Error;

use crate::domain::service::{ServiceStatus, WatchSet};

/// Errors from operations against the OS service manager.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The named service is not installed on this host.
    #[error("service '{0}' is not installed on this host")]
    NotFound(String),

    /// The service manager refused the command (insufficient privilege,
    /// disabled service, unmet dependency, ...).
    #[error("operation on service '{service}' was refused: {reason}")]
    OperationFailed { service: String, reason: String },

    /// The service did not reach the target status within the bounded wait.
    /// Distinct from refusal: the operation may still be in flight.
    #[error("service '{service}' did not reach {target} within {wait_secs}s")]
    Timeout {
        service: String,
        target: ServiceStatus,
        wait_secs: u64,
    },
}

impl ServiceError {
    /// The service name the error refers to.
    #[must_use]
    pub fn service(&self) -> &str {
        match self {
            Self::NotFound(name) => name,
            Self::OperationFailed { service, .. } | Self::Timeout { service, .. } => service,
        }
    }
}

/// Errors from suspend/resume registry mutation.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The name is already present in the target registry. Registration is
    /// rejected rather than overwritten so a repeated entry in the startup
    /// configuration surfaces instead of being silently collapsed.
    #[error("service '{service}' is already registered for {set} events")]
    DuplicateRegistration { service: String, set: WatchSet },
}
