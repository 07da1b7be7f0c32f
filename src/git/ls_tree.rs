//! Directory listings via `git ls-tree -l -z`

use super::{FileMode, GitRepo, ObjectId, ObjectKind};
use crate::error::{Result, RevtreeError};

/// One record of `git ls-tree -l` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LsTreeRecord {
    pub mode: FileMode,
    pub kind: ObjectKind,
    pub id: ObjectId,
    /// Blob size in bytes (`-` for trees and gitlinks)
    pub size: Option<u64>,
    /// Name relative to the listed directory
    pub name: String,
}

impl GitRepo {
    /// List the entries of `dir` (`""` or `"a/b/"`) in `commit`
    pub fn list_tree(&self, commit: &ObjectId, dir: &str) -> Result<Vec<LsTreeRecord>> {
        let mut args = vec!["ls-tree", "-l", "-z", commit.as_str()];
        if !dir.is_empty() {
            args.push("--");
            args.push(dir);
        }
        let output = self.run(&args)?;
        let records = parse_ls_tree(&output, dir)?;
        if records.is_empty() && !dir.is_empty() {
            self.check_directory(commit, dir)?;
        }
        Ok(records)
    }

    /// ls-tree is silent about missing paths; ask cat-file instead
    fn check_directory(&self, commit: &ObjectId, dir: &str) -> Result<()> {
        let path = dir.trim_end_matches('/');
        let spec = format!("{}:{}", commit.as_str(), path);
        let kind = self
            .run(["cat-file", "-t", spec.as_str()])
            .map_err(|_| {
                RevtreeError::git(format!("path '{}' not found in {}", path, commit.short()))
            })?;
        match String::from_utf8_lossy(&kind).trim() {
            "tree" => Ok(()),
            other => Err(RevtreeError::git(format!(
                "path '{}' is a {} in {}, not a directory",
                path,
                other,
                commit.short()
            ))),
        }
    }
}

/// Parse NUL-terminated `ls-tree -l` records, stripping the `dir` prefix
///
/// Record layout: `<mode> SP <type> SP <object> SP+ <size> TAB <path> NUL`
pub fn parse_ls_tree(output: &[u8], dir: &str) -> Result<Vec<LsTreeRecord>> {
    output
        .split(|&b| b == 0)
        .filter(|record| !record.is_empty())
        .map(|record| parse_record(&String::from_utf8_lossy(record), dir))
        .collect()
}

fn parse_record(record: &str, dir: &str) -> Result<LsTreeRecord> {
    let malformed = || RevtreeError::git(format!("malformed ls-tree record: {:?}", record));

    let (header, path) = record.split_once('\t').ok_or_else(malformed)?;
    let mut fields = header.split_whitespace();
    let mode = FileMode::parse(fields.next().ok_or_else(malformed)?)?;
    let kind = fields.next().ok_or_else(malformed)?.parse::<ObjectKind>()?;
    let id = ObjectId::parse(fields.next().ok_or_else(malformed)?)?;
    let size = match fields.next() {
        Some("-") | None => None,
        Some(value) => Some(value.parse::<u64>().map_err(|_| malformed())?),
    };

    let name = path.strip_prefix(dir).unwrap_or(path).to_string();
    if name.is_empty() {
        return Err(malformed());
    }

    Ok(LsTreeRecord {
        mode,
        kind,
        id,
        size,
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOB: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";
    const TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

    fn sample(dir: &str) -> Vec<u8> {
        format!(
            "100644 blob {BLOB}     120\t{dir}README.md\0\
             040000 tree {TREE}       -\t{dir}src\0\
             160000 commit {BLOB}       -\t{dir}vendor lib\0\
             100755 blob {BLOB}       0\t{dir}run.sh\0"
        )
        .into_bytes()
    }

    #[test]
    fn test_parse_root_listing() {
        let records = parse_ls_tree(&sample(""), "").unwrap();
        assert_eq!(records.len(), 4);

        assert_eq!(records[0].name, "README.md");
        assert_eq!(records[0].kind, ObjectKind::Blob);
        assert_eq!(records[0].size, Some(120));

        assert_eq!(records[1].name, "src");
        assert!(records[1].mode.is_dir());
        assert_eq!(records[1].size, None);

        assert_eq!(records[2].kind, ObjectKind::Commit);
        assert_eq!(records[2].name, "vendor lib");

        assert!(records[3].mode.is_executable());
        assert_eq!(records[3].size, Some(0));
    }

    #[test]
    fn test_parse_strips_directory_prefix() {
        let records = parse_ls_tree(&sample("docs/api/"), "docs/api/").unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["README.md", "src", "vendor lib", "run.sh"]);
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_ls_tree(b"", "").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_tab() {
        let bad = format!("100644 blob {BLOB} 12 README\0");
        assert!(parse_ls_tree(bad.as_bytes(), "").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_size() {
        let bad = format!("100644 blob {BLOB} big\tREADME\0");
        assert!(parse_ls_tree(bad.as_bytes(), "").is_err());
    }
}
