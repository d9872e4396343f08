//! A live-queried handle to one named OS service.

use std::time::Duration;

use crate::application::ports::ServiceManager;
use crate::domain::error::ServiceError;
use crate::domain::service::{ServiceAction, ServiceStatus};

/// How long `start`/`stop` wait for the service to reach its target status
/// before giving up with [`ServiceError::Timeout`].
pub const STATUS_WAIT: Duration = Duration::from_secs(5);

/// How often the live status is re-queried while waiting.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A capability reference to one named OS service.
///
/// Holds the name only — the service itself belongs to the OS. Status and
/// display name are looked up fresh on every call, never cached, because the
/// service can change state outside this process at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceHandle {
    name: String,
}

impl ServiceHandle {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Live status of the service.
    ///
    /// # Errors
    ///
    /// `ServiceError::NotFound` if no such service is installed.
    pub async fn status(&self, scm: &impl ServiceManager) -> Result<ServiceStatus, ServiceError> {
        scm.query_status(&self.name).await
    }

    /// Human-readable display name of the service.
    ///
    /// # Errors
    ///
    /// `ServiceError::NotFound` if no such service is installed.
    pub async fn display_name(&self, scm: &impl ServiceManager) -> Result<String, ServiceError> {
        scm.display_name(&self.name).await
    }

    /// Issue a start command and wait (bounded) until the service is running.
    ///
    /// # Errors
    ///
    /// `OperationFailed` if the service manager refuses the command,
    /// `Timeout` if the service has not reached `Running` after
    /// [`STATUS_WAIT`] — the start may still complete afterwards.
    pub async fn start(&self, scm: &impl ServiceManager) -> Result<(), ServiceError> {
        scm.send_start(&self.name).await?;
        self.await_status(scm, ServiceAction::Start.target_status())
            .await
    }

    /// Issue a stop command and wait (bounded) until the service is stopped.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ServiceHandle::start`], with `Stopped` as the
    /// target status.
    pub async fn stop(&self, scm: &impl ServiceManager) -> Result<(), ServiceError> {
        scm.send_stop(&self.name).await?;
        self.await_status(scm, ServiceAction::Stop.target_status())
            .await
    }

    /// Poll the live status until `target` is reached or [`STATUS_WAIT`]
    /// elapses. Uses tokio time, so tests run it under a paused clock.
    async fn await_status(
        &self,
        scm: &impl ServiceManager,
        target: ServiceStatus,
    ) -> Result<(), ServiceError> {
        let deadline = tokio::time::Instant::now() + STATUS_WAIT;
        loop {
            if scm.query_status(&self.name).await? == target {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(ServiceError::Timeout {
                    service: self.name.clone(),
                    target,
                    wait_secs: STATUS_WAIT.as_secs(),
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
