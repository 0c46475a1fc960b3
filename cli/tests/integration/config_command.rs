//! Integration tests for `agentbox config`.
//!
//! All filesystem-touching tests set `AGENTBOX_CONFIG` to a temp path so they
//! never read or write `~/.agentbox/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn agentbox() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentbox"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

#[test]
fn test_config_help_shows_subcommands() {
    agentbox()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn test_config_show_without_file_prints_defaults() {
    let (_dir, path) = temp_config_path();
    agentbox()
        .args(["config", "show"])
        .env("AGENTBOX_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("binary: docker"))
        .stdout(predicate::str::contains("agentbox:latest"))
        .stdout(predicate::str::contains("agentbox-models"))
        .stdout(predicate::str::contains("qwen2.5-coder:1.5b"));
}

#[test]
fn test_config_show_json_is_valid() {
    let (_dir, path) = temp_config_path();
    let assert = agentbox()
        .args(["--json", "config", "show"])
        .env("AGENTBOX_CONFIG", &path)
        .assert()
        .success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["container"]["name"], "agentbox");
    assert_eq!(value["volume"]["name"], "agentbox-models");
}

#[test]
fn test_config_path_prints_override() {
    let (_dir, path) = temp_config_path();
    agentbox()
        .args(["config", "path"])
        .env("AGENTBOX_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains(path.as_str()));
}

#[test]
fn test_config_set_persists_value() {
    let (_dir, path) = temp_config_path();
    agentbox()
        .args(["config", "set", "volume.name", "my-models"])
        .env("AGENTBOX_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set volume.name = my-models"));

    let written = std::fs::read_to_string(&path).expect("config written");
    assert!(written.contains("my-models"));

    agentbox()
        .args(["config", "show"])
        .env("AGENTBOX_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("name: my-models"));
}

#[cfg(unix)]
#[test]
fn test_config_set_writes_private_file() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, path) = temp_config_path();
    agentbox()
        .args(["config", "set", "container.image", "registry.local/agentbox:dev"])
        .env("AGENTBOX_CONFIG", &path)
        .assert()
        .success();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    agentbox()
        .args(["config", "set", "gpu.enabled", "true"])
        .env("AGENTBOX_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_invalid_name_fails() {
    let (_dir, path) = temp_config_path();
    agentbox()
        .args(["config", "set", "container.name", "bad/name"])
        .env("AGENTBOX_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));
}

#[test]
fn test_runtime_override_shows_in_status() {
    let (_dir, path) = temp_config_path();
    agentbox()
        .args(["config", "set", "runtime.binary", "agentbox-test-configured-runtime"])
        .env("AGENTBOX_CONFIG", &path)
        .assert()
        .success();
    agentbox()
        .args(["status", "--json"])
        .env("AGENTBOX_CONFIG", &path)
        .env_remove("AGENTBOX_RUNTIME")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("agentbox-test-configured-runtime"));
}

#[test]
fn test_no_color_env_accepts_any_value() {
    let (_dir, path) = temp_config_path();
    for value in ["1", "", "true", "yes"] {
        agentbox()
            .args(["config", "path"])
            .env("AGENTBOX_CONFIG", &path)
            .env("NO_COLOR", value)
            .assert()
            .success()
            .stdout(predicate::str::contains(path.as_str()));
    }
}

#[test]
fn test_no_color_flag_and_env_together() {
    let (_dir, path) = temp_config_path();
    agentbox()
        .args(["--no-color", "config", "path"])
        .env("AGENTBOX_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains(path.as_str()));
}
