//! CLI argument validation tests.
//!
//! Tests command-line argument parsing, validation, and error handling.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::Path;

use assert_cmd::Command;
use hb_screen_test_support::SyntheticImageBuilder;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from the user's config and data directories.
fn hb_screen(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hb-screen").unwrap();
    cmd.current_dir(home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"));
    cmd
}

fn palm_in(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    SyntheticImageBuilder::pink_palm(64, 48).image.save(&path).unwrap();
    path
}

// === Missing/Invalid Image Tests ===

#[test]
fn test_missing_image_warns_and_exits_2() {
    let home = tempfile::tempdir().unwrap();

    hb_screen(home.path())
        .args(["analyze", "--sex", "male"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Please provide a palm image"));
}

#[test]
fn test_nonexistent_image_is_an_error() {
    let home = tempfile::tempdir().unwrap();

    hb_screen(home.path())
        .args(["analyze", "--sex", "male", "--image", "/nonexistent/palm.jpg"])
        .assert()
        .code(2)
        .stderr(
            predicate::str::contains("error:")
                .and(predicate::str::contains("Failed to read image")),
        );
}

#[test]
fn test_unsupported_extension_rejected() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("palm.gif");
    std::fs::write(&path, b"GIF89a").unwrap();

    hb_screen(home.path())
        .args(["analyze", "--sex", "female", "--image"])
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported file type"));
}

// === Subject Validation Tests ===

#[test]
fn test_sex_is_required() {
    let home = tempfile::tempdir().unwrap();
    let image = palm_in(&home, "palm.png");

    hb_screen(home.path())
        .args(["analyze", "--image"])
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--sex"));
}

#[test]
fn test_invalid_sex_rejected() {
    let home = tempfile::tempdir().unwrap();
    let image = palm_in(&home, "palm.png");

    hb_screen(home.path())
        .args(["analyze", "--sex", "other", "--image"])
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'other'"));
}

#[test]
fn test_age_out_of_range_rejected() {
    let home = tempfile::tempdir().unwrap();
    let image = palm_in(&home, "palm.png");

    hb_screen(home.path())
        .args(["analyze", "--sex", "male", "--age", "150", "--image"])
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in 1..=120"));
}

#[test]
fn test_zero_timeout_rejected() {
    let home = tempfile::tempdir().unwrap();
    let image = palm_in(&home, "palm.png");

    hb_screen(home.path())
        .args(["analyze", "--sex", "male", "--timeout-ms", "0", "--image"])
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than 0"));
}

// === Format Validation Tests ===

#[test]
fn test_invalid_format_rejected() {
    let home = tempfile::tempdir().unwrap();
    let image = palm_in(&home, "palm.png");

    hb_screen(home.path())
        .args(["analyze", "--sex", "male", "--format", "yaml", "--image"])
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'yaml'"));
}

#[test]
fn test_subcommand_required() {
    let home = tempfile::tempdir().unwrap();

    hb_screen(home.path()).assert().failure();
}

// === Models Command Tests ===

#[test]
fn test_models_path_honours_flag() {
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join("my-models");

    hb_screen(home.path())
        .args(["models", "path", "--models-dir"])
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("my-models"));
}

#[test]
fn test_models_list_reports_missing_regressor() {
    let home = tempfile::tempdir().unwrap();

    hb_screen(home.path())
        .args(["models", "list", "--models-dir"])
        .arg(home.path().join("empty"))
        .assert()
        .success()
        .stdout(
            predicate::str::contains("hb_regressor")
                .and(predicate::str::contains("0/1 models installed")),
        );
}

#[test]
fn test_models_install_checksum_mismatch() {
    let home = tempfile::tempdir().unwrap();
    let artifact = home.path().join("trained.safetensors");
    hb_screen_test_support::write_regressor_safetensors(&artifact, 12.0).unwrap();

    hb_screen(home.path())
        .args(["models", "install", "--sha256", "deadbeef", "--models-dir"])
        .arg(home.path().join("models"))
        .arg(&artifact)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Checksum mismatch"));

    assert!(!home.path().join("models/hb_regressor.safetensors").exists());
}

#[test]
fn test_models_install_then_list() {
    let home = tempfile::tempdir().unwrap();
    let artifact = home.path().join("trained.safetensors");
    let models = home.path().join("models");
    hb_screen_test_support::write_regressor_safetensors(&artifact, 12.0).unwrap();

    hb_screen(home.path())
        .args(["models", "install", "--models-dir"])
        .arg(&models)
        .arg(&artifact)
        .assert()
        .success()
        .stdout(predicate::str::contains("sha256: "));

    hb_screen(home.path())
        .args(["models", "list", "--models-dir"])
        .arg(&models)
        .assert()
        .success()
        .stdout(predicate::str::contains("1/1 models installed"));
}
