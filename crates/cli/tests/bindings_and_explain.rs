//! CLI tests for `bindings`, `explain`, and decoder configuration files.

use std::fs;
use std::process::Command;

use assert_cmd::cargo;

fn cmdlang() -> Command {
    Command::new(cargo::cargo_bin!("cmdlang"))
}

fn write_temp_config(content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("decoder.json");
    fs::write(&path, content).expect("write temp config");
    (dir, path.to_string_lossy().to_string())
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid json ({e}): {stdout}"))
}

// ─── bindings ───────────────────────────────────────────────────────────────

#[test]
fn bindings_lists_every_keyword() {
    let output = cmdlang()
        .args(["bindings", "--output", "json"])
        .output()
        .expect("run bindings");
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["match_rule"], "prefix");
    assert_eq!(json["keywords"].as_array().unwrap().len(), 10);
}

#[test]
fn bindings_filters_by_prefix() {
    let output = cmdlang()
        .args(["bindings", "e", "--output", "json"])
        .output()
        .expect("run bindings");
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["prefix"], "e");
    assert_eq!(json["keywords"], serde_json::json!(["edit", "exit"]));
}

#[test]
fn bindings_pretty_prints_one_keyword_per_line() {
    let output = cmdlang()
        .args(["bindings", "t", "--output", "pretty"])
        .output()
        .expect("run bindings");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "tag\n");
}

// ─── explain ────────────────────────────────────────────────────────────────

#[test]
fn explain_known_code_json_returns_explanation() {
    let output = cmdlang()
        .args(["explain", "CMD3002", "--output", "json"])
        .output()
        .expect("run explain");
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["id"], "CMD3002");
    assert!(json["explanation"].is_string());
}

#[test]
fn explain_unknown_code_json_returns_null_explanation() {
    let output = cmdlang()
        .args(["explain", "CMD9999", "--output", "json"])
        .output()
        .expect("run explain");
    assert!(output.status.success());
    assert!(stdout_json(&output)["explanation"].is_null());
}

// ─── config ─────────────────────────────────────────────────────────────────

#[test]
fn config_file_selects_exact_matching() {
    let (_dir, path) = write_temp_config(r#"{ "match_rule": "exact" }"#);
    let output = cmdlang()
        .args(["decode", "del 1", "--config", &path, "--output", "json"])
        .output()
        .expect("run decode");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)["diagnostics"][0]["id"], "CMD3001");
}

#[test]
fn config_file_min_prefix_len_applies() {
    let (_dir, path) = write_temp_config(r#"{ "min_prefix_len": 2 }"#);
    let output = cmdlang()
        .args(["bindings", "d", "--config", &path, "--output", "json"])
        .output()
        .expect("run bindings");
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["keywords"], serde_json::json!([]));
}

#[test]
fn missing_config_emits_json_error_envelope() {
    let output = cmdlang()
        .args([
            "decode",
            "list",
            "--config",
            "no-such-config.json",
            "--output",
            "json",
        ])
        .output()
        .expect("run decode");
    assert!(!output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "command_failed");
    assert!(
        json["message"]
            .as_str()
            .is_some_and(|m| m.contains("failed to load config")),
        "unexpected message: {}",
        json["message"]
    );
}

#[test]
fn unknown_config_field_is_rejected() {
    let (_dir, path) = write_temp_config(r#"{ "fuzzy": true }"#);
    let output = cmdlang()
        .args(["decode", "list", "--config", &path, "--output", "json"])
        .output()
        .expect("run decode");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)["error"], "command_failed");
}
