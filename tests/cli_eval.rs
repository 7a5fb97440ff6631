// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_with_config() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .arg("1+2*4")
        .arg("sin(pi/2)")
        .assert()
        .success()
        .stdout(predicate::eq("> 1+2*4\n9\n> sin(pi/2)\n1\n"));
}

#[test]
fn test_invalid_expr() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .arg("1*")
        .arg("2")
        .assert()
        .failure()
        .stdout(predicate::eq(
            "> 1*\nIncomplete equation, maybe missing a term? at 2, near `1*`\n> 2\n2\n",
        ));
}

#[test]
fn test_invalid_config() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg("config_that_doesnt_exist.toml")
        .arg("1+1")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to read provided config file `config_that_doesnt_exist.toml`",
        ));
}

#[test]
fn test_run_file() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .arg("-f")
        .arg("tests/example.txt")
        .assert()
        .success()
        .stdout(predicate::eq(
            "9\n-2\nIncomplete equation, maybe missing a term? at 3, near `sin`\n\
             1+2*4 = 9\nx-2 = -2\nsin\nIncomplete equation, maybe missing a term? at 3, near `sin`\n",
        ));
}

#[test]
fn test_run_stdin() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .arg("-f")
        .arg("-")
        .write_stdin("2*-2\n-2*-2")
        .assert()
        .success()
        .stdout(predicate::eq("-4\n4\n"));

    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .arg("-f")
        .arg("-")
        .write_stdin("Bad data\nquit\n1+1\n")
        .assert()
        .success()
        .stdout(predicate::eq("Unknown word `Bad` at 0, near `Bad da`\n"));
}

#[test]
fn test_plot_text() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .arg("plot")
        .arg("x")
        .arg("--min")
        .arg("-1")
        .arg("--max")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::eq(
            "Y max: 1\n  | *\n  |*\n--*--\n *|\n* |\nY min: -1\nX: -1 to 1\n",
        ));
}

#[test]
fn test_plot_csv() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .args(&["plot", "x*2", "--min", "0", "--max", "2-1", "--points", "2"])
        .args(&["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::eq("x,y\n0,0\n0.5,1\n1,2\n"));
}

#[test]
fn test_plot_json() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    let output = cmd
        .arg("-c")
        .arg("tests/config_for_tests.toml")
        .args(&["plot", "ln(x)", "--min=-1", "--max=1", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let samples: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(samples["skipped"], 3);
    assert_eq!(samples["points"].as_array().unwrap().len(), 2);
    assert_eq!(samples["yMax"], 0.0);
}

#[test]
fn test_plot_errors() {
    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .args(&["plot", "sin(", "--min", "0", "--max", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse `sin(`"));

    let mut cmd = Command::cargo_bin("graphcalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .args(&["plot", "x", "--min", "5", "--max", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Domain maximum -5 is less than its minimum 5",
        ));
}
