//! The declarative watch configuration loaded once at startup.
//!
//! Pure data — loading and path resolution live in `infra::config`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `~/.dormouse/config.yaml`.
///
/// Registrations are re-declared at every startup from this file; nothing is
/// persisted back. The defaults reproduce the shipped watch list: the audio
/// endpoint builder is stopped before suspend and the audio service is
/// restarted on resume, which works around driver stacks that come back from
/// sleep with a wedged audio engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Services stopped when the machine suspends.
    pub stop_on_suspend: Vec<String>,
    /// Services started when the machine resumes.
    pub start_on_resume: Vec<String>,
    /// Event log file. `None` means `~/.dormouse/dormouse.log`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            stop_on_suspend: vec!["AudioEndpointBuilder".to_string()],
            start_on_resume: vec!["AudioSrv".to_string()],
            log_file: None,
        }
    }
}
