//! CLI skeleton tests: argument parsing, help, and version output.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn dormouse() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dormouse"));
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    dormouse().assert().code(2).stderr(predicate::str::contains(
        "Stops services when the machine suspends",
    ));
}

#[test]
fn help_flag_lists_commands() {
    dormouse()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn version_flag_shows_version() {
    dormouse()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dormouse"));
}

#[test]
fn version_command_shows_version() {
    dormouse()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dormouse 0.3.1"));
}

#[test]
fn version_command_json_outputs_valid_json() {
    let output = dormouse()
        .arg("version")
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value =
        serde_json::from_slice(&output).expect("version --json must emit valid JSON");
    assert_eq!(value["version"], "0.3.1");
}

#[test]
fn unknown_command_is_rejected() {
    dormouse()
        .arg("hibernate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
