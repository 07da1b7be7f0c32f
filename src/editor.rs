//! Blob editor launcher
//!
//! Copies a blob into a temporary file and opens it in the user's editor,
//! optionally positioned at a line. The call blocks until the editor exits;
//! the caller is responsible for handing the terminal over beforehand.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Result, RevtreeError};
use crate::git::{BlobSource, GitRepo, ObjectId};

/// Editor used when nothing else is configured
pub const DEFAULT_EDITOR: &str = "vi";
/// Prefix of temporary blob files
pub const TEMP_PREFIX: &str = "revtree-blob.";

/// Resolved editor invocation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    /// Editor command line, possibly with arguments (`code --wait`)
    pub command: String,
    /// Pass `+<line>` to the editor
    pub line_number: bool,
}

impl EditorSettings {
    /// Resolve the editor: `$GIT_EDITOR`, the configured command,
    /// `core.editor`, `$VISUAL`, `$EDITOR`, then `vi`
    pub fn resolve(repo: &GitRepo, configured: Option<&str>, line_number: bool) -> Self {
        let core_editor = repo.config_value("core.editor").unwrap_or_else(|e| {
            tracing::warn!("Could not read core.editor: {}", e);
            None
        });
        let command = pick_editor(&[
            std::env::var("GIT_EDITOR").ok(),
            configured.map(str::to_string),
            core_editor,
            std::env::var("VISUAL").ok(),
            std::env::var("EDITOR").ok(),
        ]);
        tracing::debug!("Resolved editor: {}", command);
        Self {
            command,
            line_number,
        }
    }
}

/// First non-blank candidate, or [`DEFAULT_EDITOR`]
pub fn pick_editor(candidates: &[Option<String>]) -> String {
    candidates
        .iter()
        .flatten()
        .map(|c| c.trim())
        .find(|c| !c.is_empty())
        .unwrap_or(DEFAULT_EDITOR)
        .to_string()
}

/// Arguments passed after the editor command
pub fn editor_args(file: &Path, lineno: u32, line_number: bool) -> Vec<OsString> {
    let mut args = Vec::with_capacity(2);
    if line_number && lineno > 0 {
        args.push(OsString::from(format!("+{}", lineno)));
    }
    args.push(file.as_os_str().to_owned());
    args
}

/// Runs an editor process to completion
pub trait EditorRunner {
    fn run(&self, editor: &str, args: &[OsString]) -> Result<()>;
}

/// Runs the editor through the system shell, like git does
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEditor;

impl EditorRunner for SystemEditor {
    fn run(&self, editor: &str, args: &[OsString]) -> Result<()> {
        let mut cmd = if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", editor]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(format!("{} \"$@\"", editor)).arg(editor);
            cmd
        };
        cmd.args(args);

        tracing::info!("Launching editor: {} {:?}", editor, args);
        let status = cmd
            .status()
            .map_err(|e| RevtreeError::editor(format!("failed to launch '{}': {}", editor, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(RevtreeError::editor(format!(
                "'{}' exited with {}",
                editor, status
            )))
        }
    }
}

/// Open the blob `id` in an external editor at `lineno`
///
/// `name` is only used for display and to give the temporary file a
/// recognizable suffix; `lineno` 0 means no particular line. The temporary
/// file is removed before returning.
pub fn open_blob_editor<S, R>(
    source: &S,
    runner: &R,
    settings: &EditorSettings,
    id: &ObjectId,
    name: &str,
    lineno: u32,
) -> Result<()>
where
    S: BlobSource + ?Sized,
    R: EditorRunner + ?Sized,
{
    let suffix = format!(".{}", temp_basename(name));
    let mut file = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(&suffix)
        .tempfile()?;

    source.write_blob(id, file.as_file_mut())?;
    file.as_file_mut().flush()?;

    let path: PathBuf = file.path().to_path_buf();
    tracing::debug!("Wrote blob {} to {}", id.short(), path.display());

    let args = editor_args(&path, lineno, settings.line_number);
    runner.run(&settings.command, &args)
}

impl GitRepo {
    /// [`open_blob_editor`] with this repository and the system shell
    pub fn open_blob_editor(
        &self,
        settings: &EditorSettings,
        id: &ObjectId,
        name: &str,
        lineno: u32,
    ) -> Result<()> {
        open_blob_editor(self, &SystemEditor, settings, id, name, lineno)
    }
}

/// Last path component of `name`, or `unknown`
fn temp_basename(name: &str) -> &str {
    name.rsplit('/')
        .find(|part| !part.is_empty())
        .unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct OneBlob(Vec<u8>);

    impl BlobSource for OneBlob {
        fn read_blob(&self, _id: &ObjectId) -> Result<Vec<u8>> {
            Ok(self.0.clone())
        }
    }

    struct MissingBlob;

    impl BlobSource for MissingBlob {
        fn read_blob(&self, id: &ObjectId) -> Result<Vec<u8>> {
            Err(RevtreeError::git(format!("fatal: Not a valid object name {}", id)))
        }
    }

    /// Records each invocation and the file content seen at that moment
    #[derive(Default)]
    struct RecordingRunner {
        calls: RefCell<Vec<(String, Vec<OsString>, String)>>,
    }

    impl EditorRunner for RecordingRunner {
        fn run(&self, editor: &str, args: &[OsString]) -> Result<()> {
            let file = args.last().expect("file argument");
            let content = std::fs::read_to_string(file)?;
            self.calls
                .borrow_mut()
                .push((editor.to_string(), args.to_vec(), content));
            Ok(())
        }
    }

    struct FailingRunner;

    impl EditorRunner for FailingRunner {
        fn run(&self, editor: &str, _args: &[OsString]) -> Result<()> {
            Err(RevtreeError::editor(format!("'{}' exited with 1", editor)))
        }
    }

    fn id() -> ObjectId {
        ObjectId::parse(&"5e".repeat(20)).unwrap()
    }

    fn settings(line_number: bool) -> EditorSettings {
        EditorSettings {
            command: "myedit --wait".to_string(),
            line_number,
        }
    }

    #[test]
    fn test_opens_temp_copy_at_line() {
        let runner = RecordingRunner::default();
        let source = OneBlob(b"line one\nline two\n".to_vec());

        open_blob_editor(&source, &runner, &settings(true), &id(), "src/main.rs", 2).unwrap();

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (editor, args, content) = &calls[0];
        assert_eq!(editor, "myedit --wait");
        assert_eq!(args.len(), 2);
        assert_eq!(args[0], "+2");
        assert_eq!(content, "line one\nline two\n");

        let file = PathBuf::from(&args[1]);
        let file_name = file.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with(TEMP_PREFIX));
        assert!(file_name.ends_with(".main.rs"));
        assert!(!file.exists(), "temporary file should be removed");
    }

    #[test]
    fn test_line_zero_passes_no_position() {
        let runner = RecordingRunner::default();
        open_blob_editor(&OneBlob(Vec::new()), &runner, &settings(true), &id(), "a.txt", 0)
            .unwrap();
        assert_eq!(runner.calls.borrow()[0].1.len(), 1);
    }

    #[test]
    fn test_large_line_number_is_accepted() {
        let runner = RecordingRunner::default();
        open_blob_editor(&OneBlob(Vec::new()), &runner, &settings(true), &id(), "a.txt", 10000)
            .unwrap();
        assert_eq!(runner.calls.borrow()[0].1[0], "+10000");
    }

    #[test]
    fn test_line_number_option_disabled() {
        let runner = RecordingRunner::default();
        open_blob_editor(&OneBlob(Vec::new()), &runner, &settings(false), &id(), "a.txt", 7)
            .unwrap();
        assert_eq!(runner.calls.borrow()[0].1.len(), 1);
    }

    #[test]
    fn test_missing_blob_does_not_launch_editor() {
        let runner = RecordingRunner::default();
        let err = open_blob_editor(&MissingBlob, &runner, &settings(true), &id(), "a.txt", 1)
            .unwrap_err();
        assert!(matches!(err, RevtreeError::Git(_)));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_editor_failure_is_reported() {
        let err = open_blob_editor(&OneBlob(Vec::new()), &FailingRunner, &settings(true), &id(), "a", 1)
            .unwrap_err();
        assert!(matches!(err, RevtreeError::Editor(_)));
    }

    #[test]
    fn test_pick_editor_priority() {
        let some = |s: &str| Some(s.to_string());
        assert_eq!(pick_editor(&[some("nano"), some("vim")]), "nano");
        assert_eq!(pick_editor(&[None, some("  "), some("emacs")]), "emacs");
        assert_eq!(pick_editor(&[None, None]), DEFAULT_EDITOR);
    }

    #[test]
    fn test_temp_basename() {
        assert_eq!(temp_basename("src/tree/mod.rs"), "mod.rs");
        assert_eq!(temp_basename("README"), "README");
        assert_eq!(temp_basename("dir/"), "dir");
        assert_eq!(temp_basename(""), "unknown");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_editor_runs_shell_command() {
        let temp = tempfile::TempDir::new().unwrap();
        let out = temp.path().join("args.txt");
        let editor = format!("printf '%s\\n' > '{}'", out.display());

        SystemEditor
            .run(&editor, &[OsString::from("+3"), OsString::from("file.txt")])
            .unwrap();

        let recorded = std::fs::read_to_string(&out).unwrap();
        assert_eq!(recorded, "+3\nfile.txt\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_editor_nonzero_exit() {
        let err = SystemEditor.run("false", &[]).unwrap_err();
        assert!(matches!(err, RevtreeError::Editor(_)));
    }
}
