//! Integration tests for the `canvas` CLI binary.
//!
//! These validate argument parsing, help output, credential resolution,
//! and query-option validation — all without a live Canvas instance.
#![allow(clippy::unwrap_used)]

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `canvas` binary with env isolation.
///
/// Clears all `CANVAS_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn canvas_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("canvas");
    cmd.env("HOME", "/tmp/canvas-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/canvas-cli-test-nonexistent")
        .env_remove("CANVAS_DOMAIN")
        .env_remove("CANVAS_TOKEN");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = canvas_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    canvas_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Canvas LMS")
            .and(predicate::str::contains("profile"))
            .and(predicate::str::contains("dashboard"))
            .and(predicate::str::contains("users"))
            .and(predicate::str::contains("stream")),
    );
}

#[test]
fn test_version_flag() {
    canvas_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("canvas"));
}

// ── Credential resolution ───────────────────────────────────────────

#[test]
fn test_missing_domain_is_usage_error() {
    let output = canvas_cmd().args(["profile", "1"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("No Canvas domain"), "output:\n{text}");
}

#[test]
fn test_missing_token_is_auth_error() {
    let output = canvas_cmd()
        .args(["--domain", "nku", "profile", "1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("No API token"), "output:\n{text}");
}

#[test]
fn test_domain_from_config_file() {
    // Domain comes from the config file; the run still fails on the
    // invalid sort key, which proves the file was read.
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("canvas");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "domain = \"nku\"\n").unwrap();

    let output = canvas_cmd()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["--token", "t", "users", "--sort", "invalid_value"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Invalid value for sort"), "output:\n{text}");
}

// ── Query-option validation ─────────────────────────────────────────

#[test]
fn test_invalid_sort_rejected_before_any_request() {
    // The domain points nowhere; validation must fail first.
    let output = canvas_cmd()
        .args([
            "--domain",
            "does-not-resolve",
            "--token",
            "t",
            "users",
            "--sort",
            "invalid_value",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Invalid value for sort"), "output:\n{text}");
    assert!(text.contains("username"), "help should list allowed keys:\n{text}");
}

#[test]
fn test_invalid_order_rejected() {
    let output = canvas_cmd()
        .args([
            "--domain",
            "does-not-resolve",
            "--token",
            "t",
            "users",
            "--order",
            "sideways",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Invalid value for order"), "output:\n{text}");
}
