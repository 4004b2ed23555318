//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each test
//! points HOME at a fresh temp directory so the config file is isolated.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &std::path::Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "posttime-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env_remove("POSTTIME_ENV")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_analyze_json_at_fixed_time() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["analyze", "--at", "2024-06-10 10:00", "--json", "--no-delay"],
    );
    assert_eq!(code, 0, "analyze failed: {stderr}");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["isGoodTime"], true);
    assert_eq!(json["confidence"], 100);
    assert_eq!(json["currentEngagement"], "High");
    assert_eq!(json["nextBestTime"], "12:00");
    assert_eq!(json["risks"].as_array().unwrap().len(), 0);
}

#[test]
fn test_analyze_card_output() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["analyze", "--at", "2024-06-10 02:00", "--no-delay"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Not recommended"));
    assert!(stdout.contains("Wait until 09:00 for better engagement"));
}

#[test]
fn test_analyze_weekend_aware_flag() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["analyze", "--at", "2024-06-08 10:30", "--json", "--no-delay", "--weekend-aware"],
    );
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["nextBestTime"], "11:00");
}

#[test]
fn test_analyze_rejects_bad_time() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["analyze", "--at", "noon", "--no-delay"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_tables_chart() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["tables"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("23:00"));
    assert!(stdout.contains("Weekday peaks:   09, 10, 12, 13, 14, 15, 19, 20, 21"));
}

#[test]
fn test_config_set_then_get() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "shell.delay_ms"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1000");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "shell.delay_ms", "0"]);
    assert_eq!(code, 0);

    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "shell.delay_ms"]);
    assert_eq!(stdout.trim(), "0");
}

#[test]
fn test_config_set_rejects_overlap() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["config", "set", "tables.low_engagement_hours", "[10]"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("low-engagement"));
}

#[test]
fn test_config_get_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "get", "nope"]);
    assert_ne!(code, 0);
}
