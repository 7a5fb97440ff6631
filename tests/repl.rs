// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_run_interactive() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .write_stdin("2*4+1\n")
        .env("NO_COLOR", "true")
        .assert()
        .success()
        .stdout(predicate::eq("9\n"));
}

#[test]
fn test_invalid() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .write_stdin("2 3\n")
        .env("NO_COLOR", "true")
        .assert()
        .success()
        .stdout(predicate::eq(
            "Missing operator between two operands at 2, near `2 3`\n",
        ));
}

#[test]
fn test_help_text() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .write_stdin("help\n")
        .env("NO_COLOR", "true")
        .assert()
        .success()
        .stdout(predicate::eq(graphcalc::repl::HELP_TEXT).trim());
}

#[test]
fn test_history() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .write_stdin("1/4\nplot x from 0 to 1\nclear\n7%4\nhistory\nexit\n1\n")
        .env("NO_COLOR", "true")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("X: 0 to 1\n3\n7%4 = 3\n"))
        .stdout(predicate::str::starts_with("0.25\nY max: 1\n"));
}
