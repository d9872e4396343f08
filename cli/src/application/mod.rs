//! Application layer — port trait definitions and use-case orchestration.
//!
//! This module depends only on `crate::domain` — never on `crate::infra`,
//! `crate::commands`, or `crate::output`.

pub mod deps;
pub mod handle;
pub mod mediator;
pub mod ports;
pub mod registry;

#[allow(unused_imports)]
pub use handle::ServiceHandle;
#[allow(unused_imports)]
pub use mediator::{BatchReport, PowerEventMediator, ServiceOutcome};
#[allow(unused_imports)]
pub use ports::{CommandRunner, ConfigStore, EventLog, ServiceManager};
#[allow(unused_imports)]
pub use registry::ServiceRegistry;
