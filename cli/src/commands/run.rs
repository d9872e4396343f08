//! `dormouse run` — the monitor loop.
//!
//! Subscribes to OS power notifications, turns monitoring on, and reacts
//! until ctrl-c. All service batches execute inline on this single task, so
//! no two batches ever overlap; a notification arriving mid-batch waits in
//! the channel and is handled next, in arrival order.
//!
//! On Unix, SIGUSR1 toggles monitoring without stopping the process.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::handle::ServiceHandle;
use crate::application::mediator::PowerEventMediator;
use crate::application::ports::EventLog as _;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::power::PowerEvents;
use crate::infra::privilege;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Skip the elevation check (service commands may then be refused)
    #[arg(long)]
    pub allow_unprivileged: bool,
}

/// Run `dormouse run`.
///
/// # Errors
///
/// Returns an error if the process is not elevated (unless overridden) or
/// the power-notification subscription cannot be established. Individual
/// service failures never end the loop.
pub async fn run(app: &AppContext, args: &RunArgs) -> Result<ExitCode> {
    let ctx = &app.output;
    app.log.append("dormouse starting");

    if !args.allow_unprivileged {
        let probe = TokioCommandRunner::new(Duration::from_secs(5));
        if !privilege::is_elevated(&probe).await {
            app.log.append("no administrator rights, exiting");
            anyhow::bail!(
                "controlling services requires administrator rights.\n\
                 Rerun from an elevated shell, or pass --allow-unprivileged to try anyway."
            );
        }
    }

    ctx.kv("stop on suspend", &join_names(app.registry.suspend_set()));
    ctx.kv("start on resume", &join_names(app.registry.resume_set()));

    let mut events = PowerEvents::subscribe()
        .await
        .context("subscribing to power notifications")?;
    app.log.append("power notification handler registered");

    let mut mediator = PowerEventMediator::new();
    mediator.start_monitoring(&app.log);
    ctx.success("monitoring active (ctrl-c to exit)");

    let mut toggle = ToggleSignal::new()?;
    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    ctx.error("power notification stream closed unexpectedly");
                    break;
                };
                let report = mediator
                    .handle_event(event, &app.registry, &app.scm, &app.log)
                    .await;
                if let Some(report) = report {
                    super::render_report(ctx, &report);
                }
            }
            () = toggle.recv() => {
                if mediator.is_monitoring() {
                    mediator.stop_monitoring(&app.log);
                    ctx.info("monitoring paused");
                } else {
                    mediator.start_monitoring(&app.log);
                    ctx.info("monitoring resumed");
                }
            }
            result = tokio::signal::ctrl_c() => {
                result.context("waiting for ctrl-c")?;
                break;
            }
        }
    }

    // Unsubscribe before the mediator goes out of scope: no dangling
    // callbacks into a stopped monitor.
    drop(events);
    app.log.append("power notification handler unregistered");
    app.log.append("dormouse stopping");
    ctx.info("stopped");
    Ok(ExitCode::SUCCESS)
}

fn join_names(handles: &[ServiceHandle]) -> String {
    if handles.is_empty() {
        return "(none)".to_string();
    }
    handles
        .iter()
        .map(ServiceHandle::name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// SIGUSR1 on Unix; never fires elsewhere.
#[cfg(unix)]
struct ToggleSignal(tokio::signal::unix::Signal);

#[cfg(unix)]
impl ToggleSignal {
    fn new() -> Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};
        Ok(Self(
            signal(SignalKind::user_defined1()).context("installing SIGUSR1 handler")?,
        ))
    }

    async fn recv(&mut self) {
        self.0.recv().await;
    }
}

#[cfg(not(unix))]
struct ToggleSignal;

#[cfg(not(unix))]
impl ToggleSignal {
    fn new() -> Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) {
        std::future::pending::<()>().await;
    }
}
