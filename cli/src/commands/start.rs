//! `dormouse start` — manual service start.
//!
//! Manual actions bypass the monitoring gate entirely: they act whether or
//! not a monitor is running anywhere.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::handle::ServiceHandle;
use crate::application::mediator;
use crate::application::ports::EventLog as _;

/// Arguments for the start command.
#[derive(Args)]
pub struct StartArgs {
    /// Service to start; every resume-registered service when omitted
    pub service: Option<String>,
}

/// Run `dormouse start`.
///
/// # Errors
///
/// Service failures are rendered and reflected in the exit code rather than
/// returned: the caller asked for a best-effort action, not a crash.
pub async fn run(app: &AppContext, args: &StartArgs) -> Result<ExitCode> {
    let ctx = &app.output;

    if let Some(name) = &args.service {
        app.log.append(&format!("manual start of '{name}' requested"));
        let handle = ServiceHandle::new(name.as_str());
        return Ok(match handle.start(&app.scm).await {
            Ok(()) => {
                app.log.append(&format!("start of '{name}' complete"));
                ctx.success(&format!("started '{name}'"));
                ExitCode::SUCCESS
            }
            Err(err) => {
                app.log.append(&format!("start of '{name}' failed: {err}"));
                ctx.error(&err.to_string());
                ExitCode::FAILURE
            }
        });
    }

    app.log.append("manual start of registered services requested");
    let report = mediator::start_all(&app.registry, &app.scm, &app.log).await;
    super::render_report(ctx, &report);
    Ok(if report.all_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
