//! Infrastructure implementation of the `ConfigStore` port.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::MonitorConfig;

/// Production `ConfigStore` backed by a YAML file on disk.
///
/// Load-only: registrations are re-declared at every startup and nothing is
/// written back at runtime. The location is `~/.dormouse/config.yaml`,
/// overridable with the `DORMOUSE_CONFIG` environment variable.
pub struct YamlConfigStore {
    path: Option<PathBuf>,
}

impl YamlConfigStore {
    /// Store using the default path resolution.
    #[must_use]
    pub fn new() -> Self {
        Self { path: None }
    }

    /// Store with an explicit path (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }
}

impl Default for YamlConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<MonitorConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(MonitorConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        if let Ok(val) = std::env::var("DORMOUSE_CONFIG") {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".dormouse").join("config.yaml"))
    }
}
