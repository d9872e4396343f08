//! `status` end-to-end against a scratch configuration.
//!
//! Every test points `DORMOUSE_CONFIG` at its own temp file with empty watch
//! lists, so the binary never issues a real service-control command.

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn dormouse() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dormouse"));
    cmd.env("NO_COLOR", "1");
    cmd
}

fn write_config(dir: &tempfile::TempDir, watches: &str) -> PathBuf {
    let log = dir.path().join("dormouse.log");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, format!("{watches}\nlog_file: {}\n", log.display()))
        .expect("write config");
    path
}

#[test]
fn empty_watch_lists_render_placeholders() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, "stop_on_suspend: []\nstart_on_resume: []");
    dormouse()
        .env("DORMOUSE_CONFIG", &config)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stop on suspend"))
        .stdout(predicate::str::contains("Start on resume"))
        .stdout(predicate::str::contains("no services registered"));
}

#[test]
fn status_json_has_both_sets() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, "stop_on_suspend: []\nstart_on_resume: []");
    let output = dormouse()
        .env("DORMOUSE_CONFIG", &config)
        .args(["status", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value =
        serde_json::from_slice(&output).expect("status --json must emit valid JSON");
    assert!(value["stop_on_suspend"].as_array().expect("array").is_empty());
    assert!(value["start_on_resume"].as_array().expect("array").is_empty());
}

#[test]
fn quiet_suppresses_human_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, "stop_on_suspend: []\nstart_on_resume: []");
    dormouse()
        .env("DORMOUSE_CONFIG", &config)
        .args(["--quiet", "status"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn duplicate_config_entry_fails_startup() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, "stop_on_suspend: [cups, cups]\nstart_on_resume: []");
    dormouse()
        .env("DORMOUSE_CONFIG", &config)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already registered"));
}

#[test]
fn malformed_config_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, "stop_on_suspend: { not: [a, list");
    dormouse()
        .env("DORMOUSE_CONFIG", &config)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot parse"));
}
