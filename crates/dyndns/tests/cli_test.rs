//! Integration tests for the `dyndns` binary.
//!
//! These tests validate argument parsing, help output and configuration
//! errors. Network-facing runs point every endpoint at a closed local port.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `dyndns` binary with env isolation.
fn dyndns_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("dyndns");
    cmd.env_remove("GANDI_TOKEN")
        .env_remove("DISCORD_WEBHOOK_URL")
        .env_remove("DYNDNS_LOG_LEVEL");
    cmd
}

/// Command with secrets set and every endpoint unreachable
fn configured_cmd() -> assert_cmd::Command {
    let mut cmd = dyndns_cmd();
    cmd.env("GANDI_TOKEN", "test-key")
        .env("DISCORD_WEBHOOK_URL", "http://127.0.0.1:1/hook")
        .args(["--gandi-api-url", "http://127.0.0.1:1", "--timeout", "2"]);
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_usage() {
    dyndns_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_help_flag() {
    dyndns_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("--domain")
            .and(predicate::str::contains("--record"))
            .and(predicate::str::contains("--always-notify"))
            .and(predicate::str::contains("--livebox")),
    );
}

#[test]
fn test_help_hides_secrets() {
    dyndns_cmd()
        .env("GANDI_TOKEN", "super-secret-key")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("super-secret-key").not());
}

#[test]
fn test_version_flag() {
    dyndns_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dyndns"));
}

#[test]
fn test_short_version_flag() {
    dyndns_cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_missing_token_fails() {
    dyndns_cmd()
        .env("DISCORD_WEBHOOK_URL", "http://127.0.0.1:1/hook")
        .args(["--domain", "example.com", "--record", "home"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--gandi-token"));
}

#[test]
fn test_missing_webhook_fails() {
    dyndns_cmd()
        .env("GANDI_TOKEN", "test-key")
        .args(["--domain", "example.com", "--record", "home"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--webhook-url"));
}

#[test]
fn test_ttl_out_of_range_is_config_error() {
    configured_cmd()
        .args(["--domain", "example.com", "--record", "home", "--ttl", "10"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("TTL"));
}

#[test]
fn test_invalid_domain_is_config_error() {
    configured_cmd()
        .args(["--domain", "exa mple.com", "--record", "home"])
        .assert()
        .code(1);
}

// ── Run failures ────────────────────────────────────────────────────

#[test]
fn test_unreachable_resolver_is_runtime_error() {
    configured_cmd()
        .args([
            "--domain",
            "example.com",
            "--record",
            "home",
            "--livebox",
            "--livebox-url",
            "http://127.0.0.1:1/ws",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error: Network error"));
}
