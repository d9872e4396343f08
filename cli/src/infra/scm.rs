//! `ServiceManager` implementation that drives the platform's
//! service-control CLI.
//!
//! Windows uses `sc.exe` (query/start/stop/qc/enumdepend); everything else
//! talks to `systemctl`. Start/stop are issued fire-and-forget (`sc` is
//! naturally asynchronous, systemd gets `--no-block`) because the bounded
//! wait-for-status lives in `ServiceHandle`, not here. Output parsing is
//! pure and compiled on every platform so both dialects stay under test.

use std::collections::HashMap;
use std::process::Output;

use crate::application::ports::{CommandRunner, ServiceManager};
use crate::domain::error::ServiceError;
use crate::domain::service::ServiceStatus;
use crate::infra::command_runner::TokioCommandRunner;

/// Win32 error for "the specified service does not exist", surfaced by
/// `sc.exe` as its exit code.
const ERROR_SERVICE_DOES_NOT_EXIST: i32 = 1060;

/// Service-control adapter over an external CLI.
pub struct ScmCli<R> {
    runner: R,
}

impl ScmCli<TokioCommandRunner> {
    /// Adapter wired to the production command runner.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::default())
    }
}

impl<R: CommandRunner> ScmCli<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn scm(&self, name: &str, args: &[&str]) -> Result<Output, ServiceError> {
        let program = if cfg!(windows) { "sc.exe" } else { "systemctl" };
        self.runner
            .run(program, args)
            .await
            .map_err(|err| ServiceError::OperationFailed {
                service: name.to_string(),
                reason: format!("{err:#}"),
            })
    }

    async fn show_properties(
        &self,
        name: &str,
        selector: &str,
    ) -> Result<HashMap<String, String>, ServiceError> {
        let output = self.scm(name, &["show", name, selector]).await?;
        if !output.status.success() {
            return Err(classify_systemctl_failure(name, &output));
        }
        let props = parse_properties(&String::from_utf8_lossy(&output.stdout));
        if props.get("LoadState").is_some_and(|v| v == "not-found") {
            return Err(ServiceError::NotFound(name.to_string()));
        }
        Ok(props)
    }
}

impl<R: CommandRunner> ServiceManager for ScmCli<R> {
    async fn query_status(&self, name: &str) -> Result<ServiceStatus, ServiceError> {
        if cfg!(windows) {
            let output = self.scm(name, &["query", name]).await?;
            if !output.status.success() {
                return Err(classify_sc_failure(name, &output));
            }
            Ok(parse_sc_state(&String::from_utf8_lossy(&output.stdout))
                .unwrap_or(ServiceStatus::Unknown))
        } else {
            let props = self
                .show_properties(name, "--property=LoadState,ActiveState")
                .await?;
            Ok(status_from_active_state(
                props.get("ActiveState").map_or("", String::as_str),
            ))
        }
    }

    async fn display_name(&self, name: &str) -> Result<String, ServiceError> {
        if cfg!(windows) {
            let output = self.scm(name, &["getdisplayname", name]).await?;
            if !output.status.success() {
                return Err(classify_sc_failure(name, &output));
            }
            Ok(parse_sc_display_name(&String::from_utf8_lossy(&output.stdout))
                .unwrap_or_else(|| name.to_string()))
        } else {
            let props = self
                .show_properties(name, "--property=LoadState,Description")
                .await?;
            let description = props.get("Description").map_or("", String::as_str);
            Ok(if description.is_empty() {
                name.to_string()
            } else {
                description.to_string()
            })
        }
    }

    async fn send_start(&self, name: &str) -> Result<(), ServiceError> {
        let output = if cfg!(windows) {
            self.scm(name, &["start", name]).await?
        } else {
            self.scm(name, &["start", "--no-block", name]).await?
        };
        command_result(name, &output)
    }

    async fn send_stop(&self, name: &str) -> Result<(), ServiceError> {
        let output = if cfg!(windows) {
            self.scm(name, &["stop", name]).await?
        } else {
            self.scm(name, &["stop", "--no-block", name]).await?
        };
        command_result(name, &output)
    }

    async fn dependencies(&self, name: &str) -> Result<Vec<String>, ServiceError> {
        if cfg!(windows) {
            let output = self.scm(name, &["qc", name]).await?;
            if !output.status.success() {
                return Err(classify_sc_failure(name, &output));
            }
            Ok(parse_sc_dependencies(&String::from_utf8_lossy(&output.stdout)))
        } else {
            let props = self
                .show_properties(name, "--property=LoadState,Requires,Wants")
                .await?;
            let mut units = service_units(props.get("Requires").map_or("", String::as_str));
            units.extend(service_units(props.get("Wants").map_or("", String::as_str)));
            Ok(units)
        }
    }

    async fn dependents(&self, name: &str) -> Result<Vec<String>, ServiceError> {
        if cfg!(windows) {
            let output = self.scm(name, &["enumdepend", name]).await?;
            if !output.status.success() {
                return Err(classify_sc_failure(name, &output));
            }
            Ok(parse_sc_dependents(&String::from_utf8_lossy(&output.stdout)))
        } else {
            let props = self
                .show_properties(name, "--property=LoadState,RequiredBy,WantedBy")
                .await?;
            let mut units = service_units(props.get("RequiredBy").map_or("", String::as_str));
            units.extend(service_units(props.get("WantedBy").map_or("", String::as_str)));
            Ok(units)
        }
    }
}

fn command_result(name: &str, output: &Output) -> Result<(), ServiceError> {
    if output.status.success() {
        return Ok(());
    }
    Err(if cfg!(windows) {
        classify_sc_failure(name, output)
    } else {
        classify_systemctl_failure(name, output)
    })
}

// ── Failure classification ────────────────────────────────────────────────────

fn classify_sc_failure(name: &str, output: &Output) -> ServiceError {
    let stdout = String::from_utf8_lossy(&output.stdout);
    if output.status.code() == Some(ERROR_SERVICE_DOES_NOT_EXIST)
        || stdout.contains("does not exist as an installed service")
    {
        return ServiceError::NotFound(name.to_string());
    }
    ServiceError::OperationFailed {
        service: name.to_string(),
        reason: first_line(&stdout, &String::from_utf8_lossy(&output.stderr)),
    }
}

fn classify_systemctl_failure(name: &str, output: &Output) -> ServiceError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.contains("could not be found") || stderr.contains("not loaded") {
        return ServiceError::NotFound(name.to_string());
    }
    ServiceError::OperationFailed {
        service: name.to_string(),
        reason: first_line(&stderr, &String::from_utf8_lossy(&output.stdout)),
    }
}

fn first_line(primary: &str, fallback: &str) -> String {
    primary
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .or_else(|| fallback.lines().map(str::trim).find(|l| !l.is_empty()))
        .unwrap_or("service manager gave no error output")
        .to_string()
}

// ── Output parsing (pure, both dialects) ──────────────────────────────────────

/// Extract the numeric state from `sc query` output, e.g.
/// `        STATE              : 4  RUNNING`.
fn parse_sc_state(stdout: &str) -> Option<ServiceStatus> {
    let line = stdout
        .lines()
        .find(|l| l.trim_start().starts_with("STATE"))?;
    let code: u32 = line
        .split(':')
        .nth(1)?
        .split_whitespace()
        .next()?
        .parse()
        .ok()?;
    Some(status_from_scm_code(code))
}

fn status_from_scm_code(code: u32) -> ServiceStatus {
    match code {
        1 => ServiceStatus::Stopped,
        2 => ServiceStatus::StartPending,
        3 => ServiceStatus::StopPending,
        4 => ServiceStatus::Running,
        5 => ServiceStatus::ContinuePending,
        6 => ServiceStatus::PausePending,
        7 => ServiceStatus::Paused,
        _ => ServiceStatus::Unknown,
    }
}

/// Extract the value from `sc getdisplayname` output, e.g.
/// `DisplayName = Windows Audio`.
fn parse_sc_display_name(stdout: &str) -> Option<String> {
    let line = stdout
        .lines()
        .find(|l| l.trim_start().starts_with("DisplayName"))?;
    let value = line.split_once('=')?.1.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Extract the `DEPENDENCIES` block from `sc qc` output. The first entry
/// sits on the key line, continuation entries on bare `: value` lines.
/// Group dependencies (prefixed `+`) are not services and are skipped.
fn parse_sc_dependencies(stdout: &str) -> Vec<String> {
    let mut deps = Vec::new();
    let mut in_block = false;
    for line in stdout.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("DEPENDENCIES") {
            in_block = true;
            push_dependency(&mut deps, trimmed.split_once(':').map_or("", |(_, v)| v));
        } else if in_block {
            if let Some(rest) = trimmed.strip_prefix(':') {
                push_dependency(&mut deps, rest);
            } else {
                break;
            }
        }
    }
    deps
}

fn push_dependency(deps: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !value.starts_with('+') {
        deps.push(value.to_string());
    }
}

/// Extract dependent service names from `sc enumdepend` output
/// (`SERVICE_NAME: Foo` lines).
fn parse_sc_dependents(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|l| l.trim().strip_prefix("SERVICE_NAME:"))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Parse `systemctl show` `Key=Value` lines.
fn parse_properties(stdout: &str) -> HashMap<String, String> {
    stdout
        .lines()
        .filter_map(|l| l.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

fn status_from_active_state(state: &str) -> ServiceStatus {
    match state {
        "active" | "reloading" => ServiceStatus::Running,
        "activating" => ServiceStatus::StartPending,
        "deactivating" => ServiceStatus::StopPending,
        "inactive" | "failed" => ServiceStatus::Stopped,
        _ => ServiceStatus::Unknown,
    }
}

/// Keep only `.service` units from a space-separated unit list; targets,
/// sockets and the rest are not controllable services.
fn service_units(value: &str) -> Vec<String> {
    value
        .split_whitespace()
        .filter(|u| u.ends_with(".service"))
        .map(ToString::to_string)
        .collect()
}
