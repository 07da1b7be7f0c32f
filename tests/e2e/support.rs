//! Shared fixtures: an isolated environment and a small repository

use std::fs;
use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use tempfile::TempDir;

pub const FIRST_AUTHOR: &str = "Test User";
pub const SECOND_AUTHOR: &str = "Other Dev";

/// The binary with config, data and git settings isolated under `home`
pub fn revtree(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("revtree");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env_remove("REVTREE_LOG");
    cmd
}

fn git(dir: &Path, args: &[&str], author: &str, date: &str) -> bool {
    StdCommand::new("git")
        .args(["-c", &format!("user.name={}", author)])
        .args(["-c", "user.email=test@example.com"])
        .args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn write(root: &Path, path: &str, content: &str) {
    let path = root.join(path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Two commits:
/// - 2020-01-01 by Test User: README.md, src/main.rs, src/lib.rs
/// - 2021-06-01 by Other Dev: docs/guide.txt
///
/// Returns `None` when git is not available.
pub fn fixture_repo() -> Option<TempDir> {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let first = "2020-01-01T00:00:00+0000";
    let second = "2021-06-01T12:00:00+0000";

    if !git(root, &["init", "-q"], FIRST_AUTHOR, first) {
        return None;
    }

    write(root, "README.md", "hello\n");
    write(root, "src/main.rs", "fn main() {\n    println!(\"hi\");\n}\n");
    write(
        root,
        "src/lib.rs",
        "pub fn answer() -> u32 {\n    42\n}\n\npub fn question() -> &'static str {\n    \"unknown\"\n}\n",
    );
    let ok = git(root, &["add", "."], FIRST_AUTHOR, first)
        && git(root, &["commit", "-q", "-m", "Initial commit"], FIRST_AUTHOR, first);
    if !ok {
        return None;
    }

    write(root, "docs/guide.txt", "read me\n");
    let ok = git(root, &["add", "."], SECOND_AUTHOR, second)
        && git(root, &["commit", "-q", "-m", "Add guide"], SECOND_AUTHOR, second);
    ok.then_some(temp)
}
