//! Command implementations

pub mod run;
pub mod start;
pub mod status;
pub mod stop;
pub mod version;

use crate::application::mediator::BatchReport;
use crate::output::OutputContext;

/// Print one line per batch outcome. Failures are warnings, not errors:
/// a partially-failed batch is an expected condition, not a crash.
pub(crate) fn render_report(ctx: &OutputContext, report: &BatchReport) {
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(()) => ctx.success(&format!(
                "{} of '{}' complete",
                outcome.action, outcome.service
            )),
            Err(err) => ctx.warn(&err.to_string()),
        }
    }
}
