//! Domain layer — pure types, error taxonomy, and the watch configuration.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`. All functions
//! are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod power;
pub mod service;

#[allow(unused_imports)]
pub use config::MonitorConfig;
#[allow(unused_imports)]
pub use error::{RegistryError, ServiceError};
#[allow(unused_imports)]
pub use power::PowerEvent;
#[allow(unused_imports)]
pub use service::{ServiceAction, ServiceStatus, WatchSet};
