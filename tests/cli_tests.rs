//! Tests for the binary's command-line surface.
//!
//! Everything here exits before the alternate screen is entered: help,
//! version, completions, argument validation, and preset-file errors all
//! resolve without a usable terminal.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn pomotui() -> Command {
    Command::cargo_bin("pomotui").unwrap()
}

// ============================================================================
// Help / Version
// ============================================================================

#[test]
fn test_help_lists_flags() {
    pomotui()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--focus"))
        .stdout(predicate::str::contains("--rest"))
        .stdout(predicate::str::contains("--no-sound"))
        .stdout(predicate::str::contains("--presets"));
}

#[test]
fn test_version() {
    pomotui()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pomotui"));
}

// ============================================================================
// Argument Validation
// ============================================================================

#[test]
fn test_focus_out_of_range_is_rejected() {
    pomotui()
        .args(["--focus", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));

    pomotui().args(["--focus", "121"]).assert().failure();
}

#[test]
fn test_rest_out_of_range_is_rejected() {
    pomotui().args(["--rest", "61"]).assert().failure();
}

#[test]
fn test_unknown_flag_is_rejected() {
    pomotui().arg("--sessions").assert().failure();
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    pomotui()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pomotui"));
}

#[test]
fn test_completions_requires_shell() {
    pomotui().arg("completions").assert().failure();
}

// ============================================================================
// Preset File Errors
// ============================================================================

#[test]
fn test_missing_preset_file_fails_cleanly() {
    pomotui()
        .args(["--presets", "/nonexistent/presets.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("reading preset file"));
}

#[test]
fn test_malformed_preset_file_fails_cleanly() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();

    pomotui()
        .args(["--presets", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("parsing preset file"));
}

#[test]
fn test_invalid_preset_values_fail_cleanly() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"label":"bad","focus_minutes":0,"rest_minutes":5}}]"#
    )
    .unwrap();

    pomotui()
        .args(["--presets", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid preset catalog"));
}

#[test]
fn test_empty_preset_file_fails_cleanly() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[]").unwrap();

    pomotui()
        .args(["--presets", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("must not be empty"));
}
