//! Service vocabulary: statuses, actions, and watch-set identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Live status of an OS service, as reported by the service manager.
///
/// Mirrors the service-control manager's state taxonomy; platforms with a
/// coarser model (systemd's `ActiveState`) map onto the nearest variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceStatus {
    Stopped,
    StartPending,
    StopPending,
    Running,
    ContinuePending,
    PausePending,
    Paused,
    /// The service manager reported a state this tool does not model.
    Unknown,
}

impl ServiceStatus {
    /// True for the intermediate states between stopped and running.
    #[must_use]
    pub fn is_transitional(self) -> bool {
        matches!(
            self,
            Self::StartPending | Self::StopPending | Self::ContinuePending | Self::PausePending
        )
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Stopped => "stopped",
            Self::StartPending => "start-pending",
            Self::StopPending => "stop-pending",
            Self::Running => "running",
            Self::ContinuePending => "continue-pending",
            Self::PausePending => "pause-pending",
            Self::Paused => "paused",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// The two commands this tool ever issues against a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Start,
    Stop,
}

impl ServiceAction {
    /// The status a service must reach for the action to count as complete.
    #[must_use]
    pub fn target_status(self) -> ServiceStatus {
        match self {
            Self::Start => ServiceStatus::Running,
            Self::Stop => ServiceStatus::Stopped,
        }
    }
}

impl fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Stop => "stop",
        })
    }
}

/// Which of the two watch registries a service belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchSet {
    /// Stopped when the machine suspends.
    Suspend,
    /// Started when the machine resumes.
    Resume,
}

impl fmt::Display for WatchSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Suspend => "suspend",
            Self::Resume => "resume",
        })
    }
}
