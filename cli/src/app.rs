//! Application context — unified state passed to every command handler.
//!
//! One `AppContext` is built per invocation and threaded by reference into
//! the command handlers: the single shared registry, service-control
//! adapter, and event log live here instead of behind global accessors, and
//! the power subscription receives the same instances.

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore as _;
use crate::application::registry::ServiceRegistry;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::logger::{self, FileEventLog};
use crate::infra::scm::ScmCli;
use crate::output::OutputContext;

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// The suspend/resume registries, populated from the startup config.
    pub registry: ServiceRegistry,
    /// Service-control adapter over the platform CLI.
    pub scm: ScmCli<TokioCommandRunner>,
    /// Append-only event log (no-op when the sink cannot be opened).
    pub log: FileEventLog,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or names the
    /// same service twice for one event.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let config = YamlConfigStore::new()
            .load()
            .context("loading configuration")?;
        let registry = ServiceRegistry::from_config(&config)?;
        let log = match config.log_file {
            Some(path) => FileEventLog::open(&path),
            None => match logger::default_log_path() {
                Ok(path) => FileEventLog::open(&path),
                Err(_) => FileEventLog::disabled(),
            },
        };
        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            registry,
            scm: ScmCli::default_runner(),
            log,
        })
    }
}
