//! End-to-end tests for the interval-timer binary.
//!
//! Every test points the binary at a temporary settings file and preset
//! file so the user's real config directory is never touched.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

/// Builds a command isolated inside `dir`.
fn cli(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("interval-timer").unwrap();
    cmd.arg("--config")
        .arg(dir.join("settings.json"))
        .arg("--presets-file")
        .arg(dir.join("presets.json"))
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// General
// ============================================================================

#[test]
fn test_help() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("presets"));
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("interval-timer"));
}

// ============================================================================
// Presets
// ============================================================================

#[test]
fn test_presets_list_seeds_defaults() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .args(["presets", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tabata"))
        .stdout(predicate::str::contains("20s work, 10s rest, 8 rounds"))
        .stdout(predicate::str::contains("Continuous HIIT"));

    assert!(dir.path().join("presets.json").exists());
}

#[test]
fn test_presets_save_then_list() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .args(["presets", "save", "Boxing", "-w", "180", "-r", "60", "-n", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved preset 'Boxing'"));

    cli(dir.path())
        .args(["presets", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Boxing"))
        .stdout(predicate::str::contains("180s work, 60s rest, 12 rounds"));
}

#[test]
fn test_presets_delete() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .args(["presets", "delete", "default-hiit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted preset default-hiit"));

    cli(dir.path())
        .args(["presets", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HIIT Classic").not());
}

#[test]
fn test_presets_deleting_all_defaults_keeps_list_empty() {
    let dir = tempfile::tempdir().unwrap();
    for id in [
        "default-tabata",
        "default-hiit",
        "default-balanced",
        "default-endurance",
        "default-infinite",
    ] {
        cli(dir.path())
            .args(["presets", "delete", id])
            .assert()
            .success();
    }

    cli(dir.path())
        .args(["presets", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No presets saved yet."))
        .stdout(predicate::str::contains("Tabata").not());
}

#[test]
fn test_presets_delete_unknown_fails() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .args(["presets", "delete", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_presets_save_blank_name_fails() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .args(["presets", "save", "  "])
        .assert()
        .failure();
}

// ============================================================================
// Run
// ============================================================================

#[test]
fn test_run_rejects_zero_work() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .args(["run", "--work", "0"])
        .assert()
        .failure();
}

#[test]
fn test_run_unknown_preset_fails() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .args(["run", "--preset", "yoga", "--no-sound"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no preset"));
}

#[test]
fn test_run_invalid_settings_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"defaultSettings": {"workDuration": 0, "restDuration": 10, "rounds": 8, "isInfinite": false}}"#,
    )
    .unwrap();

    cli(dir.path())
        .args(["run", "--no-sound"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid workout configuration"));
}

#[test]
fn test_run_short_workout_completes() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .args(["run", "-w", "1", "-r", "1", "-n", "1", "--no-sound"])
        .write_stdin("")
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .success()
        .stdout(predicate::str::contains("1s work, 1s rest, 1 rounds"))
        .stdout(predicate::str::contains("WORK"))
        .stdout(predicate::str::contains("[] STOPPED  00:01  1 rounds"))
        .stdout(predicate::str::contains("Workout complete!"));
}

#[test]
fn test_run_quit_command() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .args(["run", "--preset", "tabata", "--no-sound"])
        .write_stdin("q\n")
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .success()
        .stdout(predicate::str::contains("Tabata"))
        .stdout(predicate::str::contains("Workout complete!").not());
}
