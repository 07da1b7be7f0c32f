//! Basic CLI tests for revtree
//!
//! Tests for command-line argument parsing, help output, version display,
//! and error handling for invalid inputs.

use predicates::prelude::*;
use tempfile::TempDir;

use super::support::revtree;

// =============================================================================
// Help and Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    let home = TempDir::new().unwrap();
    revtree(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"))
        .stdout(predicate::str::contains("revtree [OPTIONS] [REVISION] [-- PATH]"))
        .stdout(predicate::str::contains("--list"));
}

#[test]
fn help_short_flag_shows_usage() {
    let home = TempDir::new().unwrap();
    revtree(home.path())
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"));
}

#[test]
fn version_flag_shows_version() {
    let home = TempDir::new().unwrap();
    revtree(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// Invalid Options (Exit Code 3)
// =============================================================================

#[test]
fn unknown_option_returns_exit_code_3() {
    let home = TempDir::new().unwrap();
    revtree(home.path())
        .arg("--unknown-option")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown option"));
}

#[test]
fn invalid_format_returns_exit_code_3() {
    let home = TempDir::new().unwrap();
    revtree(home.path())
        .args(["--list", "--format", "xml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn invalid_sort_field_returns_exit_code_3() {
    let home = TempDir::new().unwrap();
    revtree(home.path())
        .args(["--sort", "color"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid sort field"));
}

#[test]
fn missing_directory_returns_exit_code_3() {
    let home = TempDir::new().unwrap();
    revtree(home.path())
        .args(["-C", "/nonexistent/path/xyz", "--list"])
        .assert()
        .code(3);
}

// =============================================================================
// Runtime Errors (Exit Code 2)
// =============================================================================

#[test]
fn outside_repository_returns_exit_code_2() {
    let home = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    let ceiling = outside.path().parent().unwrap();
    revtree(home.path())
        .env("GIT_CEILING_DIRECTORIES", ceiling)
        .arg("-C")
        .arg(outside.path())
        .arg("--list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}
