use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn lemon_run_quickstart() {
    let mut cmd = Command::cargo_bin("lemon").expect("binary exists");
    cmd.arg("run").arg("demos/quickstart.lemon");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Hello from Lemon!"))
        .stdout(predicate::str::contains("Hello, World!"))
        .stdout(predicate::str::contains("Parameter 0: Ada"));
}

#[test]
fn lemon_eval_command() {
    let mut cmd = Command::cargo_bin("lemon").expect("binary exists");
    cmd.arg("eval").arg("mul").arg("6").arg("7");
    cmd.assert().success().stdout("42\n");
}

#[test]
fn lemon_eval_keeps_spaces_in_words() {
    let mut cmd = Command::cargo_bin("lemon").expect("binary exists");
    cmd.args(["eval", "add", "Hello, ", "World!"]);
    cmd.assert().success().stdout("Hello, World!\n");
}

#[test]
fn lemon_eval_reports_division_by_zero() {
    let mut cmd = Command::cargo_bin("lemon").expect("binary exists");
    cmd.args(["eval", "div", "1", "0"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DivisionByZero"));
}

#[test]
fn lemon_run_stops_at_failing_line() {
    let dir = tempdir().expect("create temp dir");
    let script = dir.path().join("broken.lemon");
    fs::write(&script, "set x 1\nget x\nget y\nget x\n").expect("write script");

    let mut cmd = Command::cargo_bin("lemon").expect("binary exists");
    cmd.arg("run").arg(&script);
    cmd.assert()
        .failure()
        .stdout("true\n1\n")
        .stderr(predicate::str::contains("undefined variable `y`"))
        .stderr(predicate::str::contains("line: 3"));
}
