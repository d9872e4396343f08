//! `dormouse status` — registry snapshots with live service state.

use std::collections::HashSet;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::application::deps;
use crate::application::handle::ServiceHandle;
use crate::application::ports::ServiceManager;
use crate::output::OutputContext;

/// Arguments for the status command.
#[derive(Args)]
pub struct StatusArgs {
    /// Also show the dependency tree of each registered service
    #[arg(long)]
    pub tree: bool,
}

#[derive(Serialize)]
struct ServiceRow {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct StatusReport {
    stop_on_suspend: Vec<ServiceRow>,
    start_on_resume: Vec<ServiceRow>,
}

/// Run `dormouse status`.
///
/// # Errors
///
/// Returns an error only on JSON serialization failure; per-service lookup
/// problems are reported inline instead.
pub async fn run(app: &AppContext, json: bool, args: &StatusArgs) -> Result<ExitCode> {
    let report = StatusReport {
        stop_on_suspend: rows(app.registry.suspend_set(), &app.scm).await,
        start_on_resume: rows(app.registry.resume_set(), &app.scm).await,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    let ctx = &app.output;
    render_set(ctx, "Stop on suspend", &report.stop_on_suspend);
    render_set(ctx, "Start on resume", &report.start_on_resume);

    if args.tree {
        render_trees(app).await;
    }

    Ok(ExitCode::SUCCESS)
}

/// Statuses are queried live, entry by entry: nothing here is cached, so
/// the view always reflects what the service manager reports right now.
async fn rows(handles: &[ServiceHandle], scm: &impl ServiceManager) -> Vec<ServiceRow> {
    let mut rows = Vec::with_capacity(handles.len());
    for handle in handles {
        let row = match handle.status(scm).await {
            Ok(status) => ServiceRow {
                name: handle.name().to_string(),
                display_name: handle.display_name(scm).await.ok(),
                status: Some(status.to_string()),
                error: None,
            },
            Err(err) => ServiceRow {
                name: handle.name().to_string(),
                display_name: None,
                status: None,
                error: Some(err.to_string()),
            },
        };
        rows.push(row);
    }
    rows
}

fn render_set(ctx: &OutputContext, title: &str, rows: &[ServiceRow]) {
    ctx.header(title);
    if rows.is_empty() {
        ctx.info("no services registered");
        return;
    }
    for row in rows {
        let value = match (&row.status, &row.error) {
            (Some(status), _) => match &row.display_name {
                Some(display) => format!("{status} ({display})"),
                None => status.clone(),
            },
            (None, Some(error)) => error.clone(),
            (None, None) => String::new(),
        };
        ctx.kv(&row.name, &value);
    }
}

async fn render_trees(app: &AppContext) {
    let ctx = &app.output;
    ctx.header("Dependencies");
    let mut seen = HashSet::new();
    let all = app
        .registry
        .suspend_set()
        .iter()
        .chain(app.registry.resume_set());
    for handle in all {
        if !seen.insert(handle.name().to_string()) {
            continue;
        }
        match deps::discover(&app.scm, handle.name()).await {
            Ok(tree) => {
                if !ctx.quiet {
                    print!("{tree}");
                }
            }
            Err(err) => ctx.warn(&err.to_string()),
        }
    }
}
