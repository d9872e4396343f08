//! `dormouse stop` — manual service stop.
//!
//! Mirror of `start`: acts on the suspend set (or one named service) and
//! bypasses the monitoring gate.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::handle::ServiceHandle;
use crate::application::mediator;
use crate::application::ports::EventLog as _;

/// Arguments for the stop command.
#[derive(Args)]
pub struct StopArgs {
    /// Service to stop; every suspend-registered service when omitted
    pub service: Option<String>,
}

/// Run `dormouse stop`.
///
/// # Errors
///
/// Service failures are rendered and reflected in the exit code rather than
/// returned.
pub async fn run(app: &AppContext, args: &StopArgs) -> Result<ExitCode> {
    let ctx = &app.output;

    if let Some(name) = &args.service {
        app.log.append(&format!("manual stop of '{name}' requested"));
        let handle = ServiceHandle::new(name.as_str());
        return Ok(match handle.stop(&app.scm).await {
            Ok(()) => {
                app.log.append(&format!("stop of '{name}' complete"));
                ctx.success(&format!("stopped '{name}'"));
                ExitCode::SUCCESS
            }
            Err(err) => {
                app.log.append(&format!("stop of '{name}' failed: {err}"));
                ctx.error(&err.to_string());
                ExitCode::FAILURE
            }
        });
    }

    app.log.append("manual stop of registered services requested");
    let report = mediator::stop_all(&app.registry, &app.scm, &app.log).await;
    super::render_report(ctx, &report);
    Ok(if report.all_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
