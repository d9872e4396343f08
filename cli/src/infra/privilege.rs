//! Elevation probe.
//!
//! Controlling system services needs administrator rights on Windows and
//! root elsewhere. Probing goes through the command runner like every other
//! OS interaction: `net session` succeeds only in an elevated shell, and
//! `id -u` prints `0` only for root.

use crate::application::ports::CommandRunner;

/// Whether this process can expect service-control commands to be accepted.
///
/// Best-effort: a probe that cannot even run counts as not elevated.
pub async fn is_elevated(runner: &impl CommandRunner) -> bool {
    if cfg!(windows) {
        runner
            .run("net", &["session"])
            .await
            .map(|output| output.status.success())
            .unwrap_or(false)
    } else {
        runner
            .run("id", &["-u"])
            .await
            .ok()
            .filter(|output| output.status.success())
            .is_some_and(|output| String::from_utf8_lossy(&output.stdout).trim() == "0")
    }
}
