//! Integration tests for the tb-cli binary commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Create a temp directory with a small table file.
fn test_tables() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tables.json");
    fs::write(
        &path,
        r#"{
  "tables": [
    { "name": "fate", "roller": { "dice": "1d6" }, "store": true, "private": true },
    { "name": "answer", "reuse": "fate",
      "data": [ { "when": [1, 2, 3], "text": "No" },
                { "when": { "from": 4, "to": 6 }, "text": "Yes" } ] },
    { "name": "mirror", "reuse": "fate",
      "data": [ { "when": [1, 2, 3], "text": "No" },
                { "when": { "from": 4, "to": 6 }, "text": "Yes" } ] },
    { "name": "weather", "data": ["fog"] },
    { "name": "forecast", "data": ["Expect ${weather} and ${1d1} squall."] }
  ]
}
"#,
    )
    .unwrap();
    (dir, path)
}

fn tabula() -> Command {
    let mut cmd = Command::cargo_bin("tabula").unwrap();
    cmd.env("NO_COLOR", "1").env("CLICOLOR", "0");
    cmd
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_dice_without_tables() {
    tabula()
        .args(["roll", "1d1"])
        .assert()
        .success()
        .stdout(predicate::str::diff("  1\n"));
}

#[test]
fn roll_template_resolves_tables() {
    let (_dir, path) = test_tables();
    tabula()
        .args(["roll", "forecast", "-t", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expect fog and 1 squall."));
}

#[test]
fn roll_unknown_text_passes_through() {
    tabula()
        .args(["roll", "no such table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no such table"));
}

#[test]
fn roll_shared_draw_agrees() {
    let (_dir, path) = test_tables();
    let assert = tabula()
        .args([
            "roll",
            "${answer}/${mirror}",
            "-t",
            path.to_str().unwrap(),
            "-n",
            "20",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<&str> = stdout.lines().map(str::trim).collect();
    assert_eq!(lines.len(), 20);
    for line in lines {
        assert!(line == "No/No" || line == "Yes/Yes", "mismatch: {line}");
    }
}

#[test]
fn roll_with_seed_is_reproducible() {
    let run = || {
        tabula()
            .args(["roll", "${3d6} ${3d6}", "-s", "7", "-n", "5"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    assert_eq!(run(), run());
}

#[test]
fn roll_echo_prints_input() {
    tabula()
        .args(["roll", "${1d1} coin", "--echo"])
        .assert()
        .success()
        .stdout(predicate::str::diff("  ${1d1} coin →\n  1 coin\n"));
}

#[test]
fn roll_without_echo_prints_only_results() {
    tabula()
        .args(["roll", "${1d1} coin", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::diff("  1 coin\n"));
}

#[test]
fn roll_rejects_zero_count() {
    tabula()
        .args(["roll", "d6", "-n", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn roll_huge_dice_count_as_total() {
    tabula()
        .args(["roll", "4000000000d1"])
        .assert()
        .success()
        .stdout(predicate::str::diff("  4000000000\n"));
}

#[test]
fn roll_fails_on_missing_file() {
    tabula()
        .args(["roll", "x", "-t", "/nonexistent/tables.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn roll_fails_on_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"tables": [{"name": "t", "roller": {"dice": "d0"}}]}"#).unwrap();

    tabula()
        .args(["roll", "t", "-t", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid table file"));
}

#[test]
fn roll_fails_on_self_reference() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loop.json");
    fs::write(&path, r#"{"tables": [{"name": "echo", "data": ["${echo}"]}]}"#).unwrap();

    tabula()
        .args(["roll", "echo", "-t", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("recursion limit"));
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_shows_public_tables() {
    let (_dir, path) = test_tables();
    tabula()
        .args(["list", "-t", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("answer"))
        .stdout(predicate::str::contains("reuse fate"))
        .stdout(predicate::str::contains("4 public tables"));
}

#[test]
fn list_without_tables() {
    tabula()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No public tables found"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_valid_tables() {
    let (_dir, path) = test_tables();
    tabula()
        .args(["check", "-t", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"))
        .stdout(predicate::str::contains("5 tables, 4 public"));
}

#[test]
fn check_reports_dangling_reuse() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dangling.json");
    fs::write(
        &path,
        r#"{"tables": [{"name": "answer", "reuse": "ghost", "data": ["x"]}]}"#,
    )
    .unwrap();

    tabula()
        .args(["check", "-t", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(r#"table "answer" reuses unknown table "ghost""#))
        .stderr(predicate::str::contains("1 dangling reuse reference"));
}

#[test]
fn check_demo_tables() {
    let demo = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/oracle.json");
    tabula()
        .args(["check", "-t", demo.to_str().unwrap()])
        .assert()
        .success();
}
