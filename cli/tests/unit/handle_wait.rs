//! Bounded-wait behavior of `ServiceHandle` under a paused clock.

#![allow(clippy::expect_used)]

use std::cell::Cell;

use dormouse_cli::application::handle::ServiceHandle;
use dormouse_cli::application::ports::ServiceManager;
use dormouse_cli::domain::error::ServiceError;
use dormouse_cli::domain::service::ServiceStatus;

/// Reports `StartPending` for the first `pending_polls` status queries, then
/// `Running` — a service that takes a while but does come up.
struct SlowScm {
    pending_polls: Cell<u32>,
}

impl ServiceManager for SlowScm {
    async fn query_status(&self, _: &str) -> Result<ServiceStatus, ServiceError> {
        let left = self.pending_polls.get();
        if left == 0 {
            return Ok(ServiceStatus::Running);
        }
        self.pending_polls.set(left - 1);
        Ok(ServiceStatus::StartPending)
    }
    async fn display_name(&self, _: &str) -> Result<String, ServiceError> {
        Ok("Slow Service".into())
    }
    async fn send_start(&self, _: &str) -> Result<(), ServiceError> {
        Ok(())
    }
    async fn send_stop(&self, _: &str) -> Result<(), ServiceError> {
        Ok(())
    }
    async fn dependencies(&self, _: &str) -> Result<Vec<String>, ServiceError> {
        Ok(vec![])
    }
    async fn dependents(&self, _: &str) -> Result<Vec<String>, ServiceError> {
        Ok(vec![])
    }
}

#[tokio::test(start_paused = true)]
async fn slow_start_within_the_window_succeeds() {
    let scm = SlowScm { pending_polls: Cell::new(3) };
    ServiceHandle::new("svc")
        .start(&scm)
        .await
        .expect("a service that settles within 5s must succeed");
}

#[tokio::test(start_paused = true)]
async fn never_settling_start_is_a_timeout() {
    // More pending polls than a 5s window at 250ms can ever consume.
    let scm = SlowScm { pending_polls: Cell::new(u32::MAX) };
    let err = ServiceHandle::new("svc")
        .start(&scm)
        .await
        .expect_err("a stuck service must time out");
    match err {
        ServiceError::Timeout { target, wait_secs, .. } => {
            assert_eq!(target, ServiceStatus::Running);
            assert_eq!(wait_secs, 5);
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn stop_timeout_targets_stopped() {
    struct NeverStops;
    impl ServiceManager for NeverStops {
        async fn query_status(&self, _: &str) -> Result<ServiceStatus, ServiceError> {
            Ok(ServiceStatus::StopPending)
        }
        async fn display_name(&self, _: &str) -> Result<String, ServiceError> {
            Ok(String::new())
        }
        async fn send_start(&self, _: &str) -> Result<(), ServiceError> {
            Ok(())
        }
        async fn send_stop(&self, _: &str) -> Result<(), ServiceError> {
            Ok(())
        }
        async fn dependencies(&self, _: &str) -> Result<Vec<String>, ServiceError> {
            Ok(vec![])
        }
        async fn dependents(&self, _: &str) -> Result<Vec<String>, ServiceError> {
            Ok(vec![])
        }
    }

    let err = ServiceHandle::new("svc")
        .stop(&NeverStops)
        .await
        .expect_err("must time out");
    assert!(matches!(
        err,
        ServiceError::Timeout { target: ServiceStatus::Stopped, .. }
    ));
}
