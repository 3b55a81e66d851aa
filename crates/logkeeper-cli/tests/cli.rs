//! End-to-end tests for the `logkeeper` binary.
//!
//! Each test runs the real binary against a fresh data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn logkeeper(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("logkeeper").expect("binary built");
    cmd.env_remove("LOGKEEPER_MAX_READ_LIMIT")
        .env_remove("RUST_LOG")
        .env("LOGKEEPER_DATA_DIR", dir.path());
    cmd
}

fn ingest(dir: &TempDir, level: &str, origin: &str, labels: &[&str], message: &str) {
    let mut cmd = logkeeper(dir);
    cmd.args(["ingest", "--level", level, "--origin", origin]);
    for label in labels {
        cmd.args(["--label", label]);
    }
    cmd.arg(message).assert().success();
}

fn search_json(dir: &TempDir, args: &[&str]) -> Vec<Value> {
    let output = logkeeper(dir)
        .args(["--format", "json", "search"])
        .args(args)
        .output()
        .expect("run search");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("json array")
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().expect("temp dir");
    logkeeper(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ingest"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_ingest_prints_timestamp() {
    let dir = TempDir::new().expect("temp dir");
    logkeeper(&dir)
        .args(["--format", "json", "ingest", "--level", "info", "--origin", "api", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"created\""));
}

#[test]
fn test_search_filters_and_orders_newest_first() {
    let dir = TempDir::new().expect("temp dir");
    ingest(&dir, "ERROR", "svcX", &["db"], "db unreachable");
    ingest(&dir, "INFO", "svcY", &[], "request served");
    ingest(&dir, "WARN", "svcX", &["db"], "slow query");

    let all = search_json(&dir, &[]);
    let messages: Vec<_> = all.iter().map(|r| r["message"].as_str()).collect();
    assert_eq!(
        messages,
        [Some("slow query"), Some("request served"), Some("db unreachable")]
    );

    let db_warnings = search_json(&dir, &["--label", "db", "--level", "warn,error", "-n", "1"]);
    assert_eq!(db_warnings.len(), 1);
    assert_eq!(db_warnings[0]["logLevel"], "WARN");
    assert_eq!(db_warnings[0]["originService"], "svcX");

    let keyword = search_json(&dir, &["--keyword", "Query"]);
    assert!(keyword.is_empty());
}

#[test]
fn test_search_table_output() {
    let dir = TempDir::new().expect("temp dir");
    ingest(&dir, "ERROR", "billing", &["payments"], "gateway timeout");

    logkeeper(&dir)
        .arg("search")
        .assert()
        .success()
        .stdout(predicate::str::contains("gateway timeout"))
        .stdout(predicate::str::contains("Total: 1 record(s)"));
}

#[test]
fn test_delete_reports_count_and_is_idempotent() {
    let dir = TempDir::new().expect("temp dir");
    ingest(&dir, "ERROR", "svcX", &["db"], "db unreachable");
    ingest(&dir, "INFO", "svcY", &[], "request served");

    logkeeper(&dir)
        .args(["delete", "--level", "error"])
        .assert()
        .success()
        .stdout("Removed 1 record(s)\n");
    logkeeper(&dir)
        .args(["delete", "--level", "error"])
        .assert()
        .success()
        .stdout("Removed 0 record(s)\n");

    let rest = search_json(&dir, &[]);
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0]["originService"], "svcY");
}

#[test]
fn test_search_over_read_limit_exits_with_2() {
    let dir = TempDir::new().expect("temp dir");
    logkeeper(&dir)
        .args(["--max-read-limit", "10", "search", "--limit", "11"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("exceeds the maximum of 10"));
}

#[test]
fn test_read_limit_from_environment() {
    let dir = TempDir::new().expect("temp dir");
    for i in 0..5 {
        ingest(&dir, "DEBUG", "svc", &[], &format!("event {i}"));
    }

    let output = logkeeper(&dir)
        .env("LOGKEEPER_MAX_READ_LIMIT", "3")
        .args(["--format", "json", "search"])
        .output()
        .expect("run search");
    assert!(output.status.success());
    let records: Vec<Value> = serde_json::from_slice(&output.stdout).expect("json array");
    assert_eq!(records.len(), 3);
}

#[test]
fn test_ingest_rejects_unknown_level() {
    let dir = TempDir::new().expect("temp dir");
    logkeeper(&dir)
        .args(["ingest", "--level", "fatal", "--origin", "api", "boom"])
        .assert()
        .failure();
}

#[test]
fn test_ingest_rejects_blank_origin() {
    let dir = TempDir::new().expect("temp dir");
    logkeeper(&dir)
        .args(["ingest", "--level", "info", "--origin", " ", "boom"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("origin service must not be empty"));
}
