//! End-to-end mediator scenarios over the public API.

#![allow(clippy::expect_used)]

use dormouse_cli::application::mediator::{self, PowerEventMediator};
use dormouse_cli::application::registry::ServiceRegistry;
use dormouse_cli::domain::error::ServiceError;
use dormouse_cli::domain::power::PowerEvent;

use crate::mocks::{FakeScm, RecordingLog};

fn audio_registry() -> ServiceRegistry {
    let mut registry = ServiceRegistry::new();
    registry
        .register_for_suspend("AudioEndpointBuilder")
        .expect("fresh registry");
    registry
        .register_for_resume("AudioSrv")
        .expect("fresh registry");
    registry
}

#[tokio::test]
async fn suspend_resume_round_trip_touches_the_right_sets() {
    let scm = FakeScm::new();
    let registry = audio_registry();
    let log = RecordingLog::new();
    let mut mediator = PowerEventMediator::new();
    mediator.start_monitoring(&log);

    // Suspend: exactly one stop of the suspend entry, resume set untouched.
    mediator
        .handle_event(PowerEvent::Suspend, &registry, &scm, &log)
        .await
        .expect("active suspend produces a batch");
    assert_eq!(*scm.stops.borrow(), ["AudioEndpointBuilder"]);
    assert!(scm.starts.borrow().is_empty());

    // Resume: exactly one start of the resume entry.
    mediator
        .handle_event(PowerEvent::Resume, &registry, &scm, &log)
        .await
        .expect("active resume produces a batch");
    assert_eq!(*scm.starts.borrow(), ["AudioSrv"]);
    assert_eq!(scm.stops.borrow().len(), 1, "no extra stops on resume");
}

#[tokio::test]
async fn idle_mediator_never_touches_services() {
    let scm = FakeScm::new();
    let registry = audio_registry();
    let log = RecordingLog::new();
    let mediator = PowerEventMediator::new();

    let report = mediator
        .handle_event(PowerEvent::Suspend, &registry, &scm, &log)
        .await;

    assert!(report.is_none());
    assert!(scm.stops.borrow().is_empty());
    assert!(scm.starts.borrow().is_empty());
    assert!(log.contains("suspend"), "the dropped event is still logged");
}

#[tokio::test]
async fn event_dropped_while_idle_is_not_replayed_after_reactivation() {
    let scm = FakeScm::new();
    let registry = audio_registry();
    let log = RecordingLog::new();
    let mut mediator = PowerEventMediator::new();
    mediator.start_monitoring(&log);
    mediator.stop_monitoring(&log);

    // A resume arriving while idle is dropped...
    let dropped = mediator
        .handle_event(PowerEvent::Resume, &registry, &scm, &log)
        .await;
    assert!(dropped.is_none());

    // ...and turning monitoring back on does not replay it.
    mediator.start_monitoring(&log);
    assert!(mediator.is_monitoring());
    assert!(
        scm.starts.borrow().is_empty(),
        "reactivation must not re-deliver the dropped event"
    );
}

#[tokio::test]
async fn batch_reports_a_missing_service_and_carries_on() {
    let scm = FakeScm {
        missing: vec!["ghost".to_string()],
        ..FakeScm::new()
    };
    let mut registry = ServiceRegistry::new();
    for name in ["real", "ghost", "also-real"] {
        registry.register_for_suspend(name).expect("fresh registry");
    }
    let log = RecordingLog::new();

    let report = mediator::stop_all(&registry, &scm, &log).await;

    assert_eq!(report.outcomes.len(), 3, "every entry gets an outcome");
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert!(matches!(
        failures[0].result,
        Err(ServiceError::NotFound(_))
    ));
    assert!(log.contains("'ghost'"), "the failure is logged: {:?}", log.lines.borrow());
    assert!(
        log.contains("'also-real'"),
        "entries after the missing one are still actioned"
    );
}

#[tokio::test]
async fn unregistered_names_are_invisible_to_batches() {
    let scm = FakeScm::new();
    let mut registry = audio_registry();
    registry.unregister_suspend("AudioEndpointBuilder");
    let log = RecordingLog::new();

    let report = mediator::stop_all(&registry, &scm, &log).await;

    assert!(report.outcomes.is_empty());
    assert!(scm.stops.borrow().is_empty());
}
