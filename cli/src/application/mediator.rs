//! The power-event mediator: turns OS power notifications into best-effort
//! service batches.

use crate::application::handle::ServiceHandle;
use crate::application::ports::{EventLog, ServiceManager};
use crate::application::registry::ServiceRegistry;
use crate::domain::error::ServiceError;
use crate::domain::power::PowerEvent;
use crate::domain::service::ServiceAction;

/// Outcome of one service action within a batch.
#[derive(Debug)]
pub struct ServiceOutcome {
    pub service: String,
    pub action: ServiceAction,
    pub result: Result<(), ServiceError>,
}

/// Result of a best-effort batch: every registry entry was attempted exactly
/// once, in registration order; failures are collected, never rolled back.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<ServiceOutcome>,
}

impl BatchReport {
    /// The outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ServiceOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// True when every entry succeeded (vacuously true for an empty batch).
    #[must_use]
    pub fn all_ok(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Gates whether power notifications trigger automatic batches.
///
/// Two states: Idle (monitoring off, the initial state) and Active.
/// Owned by the single event-loop task; manual batch commands bypass the
/// gate entirely, so the flag is never shared across threads.
#[derive(Debug, Default)]
pub struct PowerEventMediator {
    monitoring: bool,
}

impl PowerEventMediator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    /// Idle → Active. Already Active is a no-op: nothing is logged and no
    /// other side effect fires.
    pub fn start_monitoring(&mut self, log: &impl EventLog) {
        if !self.monitoring {
            self.monitoring = true;
            log.append("monitoring started");
        }
    }

    /// Active → Idle. Already Idle is a no-op.
    pub fn stop_monitoring(&mut self, log: &impl EventLog) {
        if self.monitoring {
            self.monitoring = false;
            log.append("monitoring stopped");
        }
    }

    /// React to one power notification.
    ///
    /// While Active, `Suspend` stops the suspend set and `Resume` starts the
    /// resume set; the report of the batch is returned for the caller to
    /// surface. `StatusChange` is logged only. While Idle every notification
    /// is logged and dropped — never buffered for replay.
    pub async fn handle_event(
        &self,
        event: PowerEvent,
        registry: &ServiceRegistry,
        scm: &impl ServiceManager,
        log: &impl EventLog,
    ) -> Option<BatchReport> {
        log.append(&format!("power event received: {event}"));
        match event {
            PowerEvent::StatusChange => None,
            PowerEvent::Suspend | PowerEvent::Resume if !self.monitoring => {
                log.append("monitoring is off, event ignored");
                None
            }
            PowerEvent::Suspend => Some(stop_all(registry, scm, log).await),
            PowerEvent::Resume => Some(start_all(registry, scm, log).await),
        }
    }
}

/// Start every service in the resume set. Used by the mediator on resume and
/// by the manual start-all command, which bypasses the monitoring gate.
pub async fn start_all(
    registry: &ServiceRegistry,
    scm: &impl ServiceManager,
    log: &impl EventLog,
) -> BatchReport {
    log.append(&format!(
        "starting {} registered services",
        registry.resume_set().len()
    ));
    run_batch(registry.resume_set(), ServiceAction::Start, scm, log).await
}

/// Stop every service in the suspend set. Used by the mediator on suspend
/// and by the manual stop-all command, which bypasses the monitoring gate.
pub async fn stop_all(
    registry: &ServiceRegistry,
    scm: &impl ServiceManager,
    log: &impl EventLog,
) -> BatchReport {
    log.append(&format!(
        "stopping {} registered services",
        registry.suspend_set().len()
    ));
    run_batch(registry.suspend_set(), ServiceAction::Stop, scm, log).await
}

/// Sequentially apply `action` to every handle. A failing entry is recorded
/// and the batch moves on to the next — one wedged service must not shield
/// the rest from being actioned.
async fn run_batch(
    handles: &[ServiceHandle],
    action: ServiceAction,
    scm: &impl ServiceManager,
    log: &impl EventLog,
) -> BatchReport {
    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = match action {
            ServiceAction::Start => handle.start(scm).await,
            ServiceAction::Stop => handle.stop(scm).await,
        };
        match &result {
            Ok(()) => log.append(&format!("{action} of '{}' complete", handle.name())),
            Err(err) => log.append(&format!("{action} of '{}' failed: {err}", handle.name())),
        }
        outcomes.push(ServiceOutcome {
            service: handle.name().to_string(),
            action,
            result,
        });
    }
    BatchReport { outcomes }
}
