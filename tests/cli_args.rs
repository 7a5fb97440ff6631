// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .assert()
        .success();
}

#[test]
fn test_invalid() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("--asdf").assert().failure();
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    let output = format!("Graphcalc {}\n", env!("CARGO_PKG_VERSION"));
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::eq(output));

    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    let output = format!("Graphcalc {}\n", env!("CARGO_PKG_VERSION"));
    cmd.arg("-V")
        .assert()
        .success()
        .stdout(predicate::eq(output));
}

#[test]
fn test_config_path() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("--config-path")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("/config.toml\n"));
}

#[test]
fn test_bad_log_level() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[graphcalc]\nlog_level = \"loud\"\n").unwrap();

    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg(&path)
        .arg("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown log level `loud`"));
}

#[test]
fn test_unknown_config_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[plot]\ncolour = \"red\"\n").unwrap();

    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg(&path)
        .arg("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("While parsing config.toml"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .arg("-vv")
        .arg("1+")
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("> 1+\n"))
        .stderr(predicate::str::contains("failed to parse"));
}
