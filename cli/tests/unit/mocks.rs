//! Shared mock infrastructure for unit tests.
//!
//! Provides a scriptable [`ServiceManager`] and a recording [`EventLog`] so
//! each test file doesn't have to re-define the same boilerplate.

#![allow(clippy::expect_used)]

use std::cell::RefCell;
use std::collections::HashMap;

use dormouse_cli::application::ports::{EventLog, ServiceManager};
use dormouse_cli::domain::error::ServiceError;
use dormouse_cli::domain::service::ServiceStatus;

/// Scriptable service manager.
///
/// Services obey commands instantly unless listed in `refuse` (commands fail
/// with `OperationFailed`), `missing` (every call fails with `NotFound`), or
/// `stuck` (commands are accepted but the status never changes).
#[derive(Default)]
pub struct FakeScm {
    pub states: RefCell<HashMap<String, ServiceStatus>>,
    pub starts: RefCell<Vec<String>>,
    pub stops: RefCell<Vec<String>>,
    pub refuse: Vec<String>,
    pub missing: Vec<String>,
    pub stuck: Vec<String>,
}

impl FakeScm {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_known(&self, name: &str) -> Result<(), ServiceError> {
        if self.missing.iter().any(|n| n == name) {
            return Err(ServiceError::NotFound(name.to_string()));
        }
        Ok(())
    }

    fn check_accepted(&self, name: &str) -> Result<(), ServiceError> {
        self.check_known(name)?;
        if self.refuse.iter().any(|n| n == name) {
            return Err(ServiceError::OperationFailed {
                service: name.to_string(),
                reason: "scripted refusal".to_string(),
            });
        }
        Ok(())
    }

    fn settle(&self, name: &str, status: ServiceStatus) {
        if !self.stuck.iter().any(|n| n == name) {
            self.states.borrow_mut().insert(name.to_string(), status);
        }
    }
}

impl ServiceManager for FakeScm {
    async fn query_status(&self, name: &str) -> Result<ServiceStatus, ServiceError> {
        self.check_known(name)?;
        Ok(self
            .states
            .borrow()
            .get(name)
            .copied()
            .unwrap_or(ServiceStatus::Stopped))
    }

    async fn display_name(&self, name: &str) -> Result<String, ServiceError> {
        self.check_known(name)?;
        Ok(format!("{name} (display)"))
    }

    async fn send_start(&self, name: &str) -> Result<(), ServiceError> {
        self.starts.borrow_mut().push(name.to_string());
        self.check_accepted(name)?;
        self.settle(name, ServiceStatus::Running);
        Ok(())
    }

    async fn send_stop(&self, name: &str) -> Result<(), ServiceError> {
        self.stops.borrow_mut().push(name.to_string());
        self.check_accepted(name)?;
        self.settle(name, ServiceStatus::Stopped);
        Ok(())
    }

    async fn dependencies(&self, name: &str) -> Result<Vec<String>, ServiceError> {
        self.check_known(name)?;
        Ok(vec![])
    }

    async fn dependents(&self, name: &str) -> Result<Vec<String>, ServiceError> {
        self.check_known(name)?;
        Ok(vec![])
    }
}

/// Event log that records every appended line.
#[derive(Default)]
pub struct RecordingLog {
    pub lines: RefCell<Vec<String>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|l| l.contains(needle))
    }
}

impl EventLog for RecordingLog {
    fn append(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }
}
