//! Integration tests for `secdist sections`.

mod common;

use common::secdist_cmd;
use predicates::prelude::*;

#[test]
fn test_sections_lists_user_passwords() {
    secdist_cmd()
        .arg("sections")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("user-passwords"));
}

#[test]
fn test_sections_ignores_unreadable_config() {
    secdist_cmd()
        .arg("sections")
        .env("SECDIST_CONFIG_PATH", "/nonexistent/secdist.json")
        .assert()
        .code(0);
}

#[test]
fn test_sections_json_output() {
    let output = secdist_cmd()
        .args(["sections", "-o", "json"])
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();

    let entries: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let entries = entries.as_array().unwrap();
    assert!(
        entries
            .iter()
            .any(|entry| entry["name"] == "user-passwords" && entry["slot"].is_u64())
    );
}

#[test]
fn test_invalid_output_format_is_general_error() {
    secdist_cmd()
        .args(["sections", "-o", "xml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid output format"));
}
