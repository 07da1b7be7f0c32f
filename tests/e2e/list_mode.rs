//! E2E tests for listing mode (--list)

use predicates::prelude::*;
use tempfile::TempDir;

use super::support::{fixture_repo, revtree, FIRST_AUTHOR, SECOND_AUTHOR};

fn names(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter_map(|line| line.rsplit('\t').next())
        .map(String::from)
        .collect()
}

#[test]
fn list_root_puts_directories_first() {
    let Some(repo) = fixture_repo() else {
        return; // Skip if git not available
    };
    let home = TempDir::new().unwrap();

    let output = revtree(home.path())
        .arg("-C")
        .arg(repo.path())
        .arg("--list")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(names(&output.stdout), ["docs", "src", "README.md"]);
}

#[test]
fn list_lines_are_annotated() {
    let Some(repo) = fixture_repo() else {
        return;
    };
    let home = TempDir::new().unwrap();

    revtree(home.path())
        .arg("-C")
        .arg(repo.path())
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"(?m)^040000\ttree\t[0-9a-f]{40}\t-\t2021-06-01 12:00 \+0000\tOther Dev\tdocs$",
        )
        .unwrap())
        .stdout(predicate::str::is_match(
            r"(?m)^100644\tblob\t[0-9a-f]{40}\t6\t2020-01-01 00:00 \+0000\tTest User\tREADME\.md$",
        )
        .unwrap());
}

#[test]
fn list_without_annotation_uses_placeholders() {
    let Some(repo) = fixture_repo() else {
        return;
    };
    let home = TempDir::new().unwrap();

    revtree(home.path())
        .arg("-C")
        .arg(repo.path())
        .args(["--list", "--no-annotate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\t6\t-\t-\tREADME.md"))
        .stdout(predicate::str::contains(FIRST_AUTHOR).not());
}

#[test]
fn list_subdirectory_after_double_dash() {
    let Some(repo) = fixture_repo() else {
        return;
    };
    let home = TempDir::new().unwrap();

    let output = revtree(home.path())
        .arg("-C")
        .arg(repo.path())
        .args(["--list", "--", "src"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(names(&output.stdout), ["lib.rs", "main.rs"]);
}

#[test]
fn list_older_revision() {
    let Some(repo) = fixture_repo() else {
        return;
    };
    let home = TempDir::new().unwrap();

    let output = revtree(home.path())
        .arg("-C")
        .arg(repo.path())
        .args(["--list", "HEAD~1"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(names(&output.stdout), ["src", "README.md"]);
}

#[test]
fn list_sorted_by_size_reversed() {
    let Some(repo) = fixture_repo() else {
        return;
    };
    let home = TempDir::new().unwrap();

    let output = revtree(home.path())
        .arg("-C")
        .arg(repo.path())
        .args(["--list", "--sort", "size", "--reverse", "--", "src"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(names(&output.stdout), ["lib.rs", "main.rs"]);
}

#[test]
fn list_sorted_by_date_keeps_directories_first() {
    let Some(repo) = fixture_repo() else {
        return;
    };
    let home = TempDir::new().unwrap();

    let output = revtree(home.path())
        .arg("-C")
        .arg(repo.path())
        .args(["--list", "--sort", "date", "--reverse"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(names(&output.stdout), ["docs", "src", "README.md"]);
}

#[test]
fn list_json_format() {
    let Some(repo) = fixture_repo() else {
        return;
    };
    let home = TempDir::new().unwrap();

    let output = revtree(home.path())
        .arg("-C")
        .arg(repo.path())
        .args(["--list", "--format", "json", "--", "src"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "lib.rs");
    assert_eq!(entries[0]["path"], "src/lib.rs");
    assert_eq!(entries[0]["mode"], "100644");
    assert_eq!(entries[0]["kind"], "blob");
    assert_eq!(entries[0]["author"], FIRST_AUTHOR);
}

#[test]
fn list_json_root_annotates_directories() {
    let Some(repo) = fixture_repo() else {
        return;
    };
    let home = TempDir::new().unwrap();

    let output = revtree(home.path())
        .arg("-C")
        .arg(repo.path())
        .args(["--list", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["name"], "docs");
    assert_eq!(value[0]["kind"], "tree");
    assert_eq!(value[0]["size"], serde_json::Value::Null);
    assert_eq!(value[0]["author"], SECOND_AUTHOR);
}

#[test]
fn unknown_revision_returns_exit_code_2() {
    let Some(repo) = fixture_repo() else {
        return;
    };
    let home = TempDir::new().unwrap();

    revtree(home.path())
        .arg("-C")
        .arg(repo.path())
        .args(["--list", "no-such-branch"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown revision 'no-such-branch'"));
}

#[test]
fn missing_start_path_returns_exit_code_2() {
    let Some(repo) = fixture_repo() else {
        return;
    };
    let home = TempDir::new().unwrap();

    revtree(home.path())
        .arg("-C")
        .arg(repo.path())
        .args(["--list", "--", "no/such/dir"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("path 'no/such/dir' not found"));
}

#[test]
fn file_start_path_returns_exit_code_2() {
    let Some(repo) = fixture_repo() else {
        return;
    };
    let home = TempDir::new().unwrap();

    revtree(home.path())
        .arg("-C")
        .arg(repo.path())
        .args(["--list", "--", "README.md"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a directory"));
}
