//! Git process plumbing
//!
//! Every repository query runs the `git` executable and captures its output.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use super::ObjectId;
use crate::error::{Result, RevtreeError};

/// Cached git executable path
static GIT_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Find git executable path using standard locations or which command
pub fn find_git_executable() -> Option<&'static PathBuf> {
    GIT_PATH
        .get_or_init(|| {
            let candidates = [
                "/usr/bin/git",
                "/usr/local/bin/git",
                "/opt/homebrew/bin/git",
            ];

            for path in candidates {
                let p = PathBuf::from(path);
                if p.exists() {
                    return Some(p);
                }
            }

            // Fallback: which git
            Command::new("which")
                .arg("git")
                .output()
                .ok()
                .filter(|o| o.status.success())
                .and_then(|o| String::from_utf8(o.stdout).ok())
                .map(|s| PathBuf::from(s.trim()))
                .filter(|p| p.exists())
        })
        .as_ref()
}

/// Handle to a git working tree
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Locate the repository containing `dir`
    pub fn discover(dir: &Path) -> Result<Self> {
        let output = git_command(dir)?
            .args(["rev-parse", "--show-toplevel"])
            .output()?;

        if !output.status.success() {
            return Err(RevtreeError::git(format!(
                "{} is not inside a git repository",
                dir.display()
            )));
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::debug!("Discovered repository at {}", root);
        Ok(Self {
            root: PathBuf::from(root),
        })
    }

    /// Wrap an already-known repository root
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Repository top-level directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Prepare a git command running in the repository root
    pub fn command(&self) -> Result<Command> {
        git_command(&self.root)
    }

    /// Run git and return its stdout, failing on a non-zero exit status
    pub fn run<I, S>(&self, args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = self.command()?;
        cmd.args(args);
        tracing::trace!("Running {:?}", cmd);
        let output = cmd.output()?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(RevtreeError::git(stderr.trim().to_string()))
        }
    }

    /// Run git, streaming its stdout into `out`
    pub fn run_to<I, S>(&self, args: I, out: &mut dyn Write) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = self.command()?;
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        tracing::trace!("Streaming {:?}", cmd);

        let mut child = cmd.spawn()?;
        if let Some(mut stdout) = child.stdout.take() {
            io::copy(&mut stdout, out)?;
        }
        let output = child.wait_with_output()?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(RevtreeError::git(stderr.trim().to_string()))
        }
    }

    /// Resolve a revision expression to the commit it names
    pub fn resolve_commit(&self, rev: &str) -> Result<ObjectId> {
        let spec = format!("{}^{{commit}}", rev);
        let stdout = self
            .run(["rev-parse", "--verify", "--quiet", spec.as_str()])
            .map_err(|_| RevtreeError::git(format!("unknown revision '{}'", rev)))?;
        ObjectId::parse(&String::from_utf8_lossy(&stdout))
    }

    /// Read a git config value; `None` when unset
    pub fn config_value(&self, key: &str) -> Result<Option<String>> {
        let output = self.command()?.args(["config", "--get", key]).output()?;

        // `git config --get` exits 1 for a missing key
        match output.status.code() {
            Some(0) => {
                let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
                Ok(if value.is_empty() { None } else { Some(value) })
            }
            Some(1) => Ok(None),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(RevtreeError::git(stderr.trim().to_string()))
            }
        }
    }
}

fn git_command(dir: &Path) -> Result<Command> {
    let git = find_git_executable().ok_or_else(|| RevtreeError::git("git not found"))?;
    let mut cmd = Command::new(git);
    cmd.current_dir(dir);
    Ok(cmd)
}
