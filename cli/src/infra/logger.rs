//! Infrastructure implementation of the `EventLog` port.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;

use crate::application::ports::EventLog;

/// Append-only event log file. One timestamped line per entry, flushed
/// immediately so a hard power-off loses at most the line being written.
///
/// Opening can fail (file locked by another instance, unwritable directory);
/// the logger then degrades to a silent no-op instead of failing the
/// process — losing the log must never take monitoring down with it.
pub struct FileEventLog {
    file: Option<Mutex<File>>,
}

impl FileEventLog {
    /// Open `path` for appending, creating parent directories as needed.
    #[must_use]
    pub fn open(path: &Path) -> Self {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
            .map(Mutex::new);
        Self { file }
    }

    /// A logger that discards everything. Used when no log path can be
    /// resolved at all.
    #[must_use]
    pub fn disabled() -> Self {
        Self { file: None }
    }

    /// Whether the sink actually writes anywhere.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.file.is_some()
    }
}

impl EventLog for FileEventLog {
    fn append(&self, message: &str) {
        let Some(file) = &self.file else { return };
        let Ok(mut file) = file.lock() else { return };
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(file, "{stamp} - {message}");
        let _ = file.flush();
    }
}

/// Default log location: `~/.dormouse/dormouse.log`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_log_path() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.join(".dormouse").join("dormouse.log"))
}
