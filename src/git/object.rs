//! Typed git object names, kinds and modes

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Result, RevtreeError};

/// Length of a SHA-1 object name in hex digits
pub const SHA1_HEX_LEN: usize = 40;
/// Length of a SHA-256 object name in hex digits
pub const SHA256_HEX_LEN: usize = 64;
/// Length of abbreviated ids shown in the UI
pub const SHORT_LEN: usize = 7;

/// A validated, lower-case hexadecimal git object name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object name
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.len() != SHA1_HEX_LEN && trimmed.len() != SHA256_HEX_LEN {
            return Err(RevtreeError::invalid_object_id(
                value,
                "expected 40 or 64 hex digits",
            ));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(RevtreeError::invalid_object_id(
                value,
                "contains non-hex characters",
            ));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Full hex name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated name for display
    pub fn short(&self) -> &str {
        &self.0[..SHORT_LEN]
    }
}

impl FromStr for ObjectId {
    type Err = RevtreeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ObjectId {
    type Error = RevtreeError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Object type as reported by `git ls-tree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Blob,
    Tree,
    /// Submodule gitlink
    Commit,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Tree => "tree",
            ObjectKind::Commit => "commit",
        }
    }
}

impl FromStr for ObjectKind {
    type Err = RevtreeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "blob" => Ok(ObjectKind::Blob),
            "tree" => Ok(ObjectKind::Tree),
            "commit" => Ok(ObjectKind::Commit),
            other => Err(RevtreeError::git(format!("unknown object type '{}'", other))),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Git file mode (octal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileMode(pub u32);

impl FileMode {
    pub const TREE: FileMode = FileMode(0o040000);
    pub const BLOB: FileMode = FileMode(0o100644);
    pub const EXECUTABLE: FileMode = FileMode(0o100755);
    pub const SYMLINK: FileMode = FileMode(0o120000);
    pub const GITLINK: FileMode = FileMode(0o160000);

    /// Parse the octal mode column
    pub fn parse(value: &str) -> Result<Self> {
        u32::from_str_radix(value, 8)
            .map(FileMode)
            .map_err(|_| RevtreeError::git(format!("invalid file mode '{}'", value)))
    }

    pub fn is_dir(&self) -> bool {
        *self == Self::TREE
    }

    pub fn is_executable(&self) -> bool {
        *self == Self::EXECUTABLE
    }

    pub fn is_symlink(&self) -> bool {
        *self == Self::SYMLINK
    }

    pub fn is_gitlink(&self) -> bool {
        *self == Self::GITLINK
    }

    /// Render as a 10-character permission string
    pub fn permissions(&self) -> &'static str {
        match *self {
            Self::TREE => "drwxr-xr-x",
            Self::BLOB => "-rw-r--r--",
            Self::EXECUTABLE => "-rwxr-xr-x",
            Self::SYMLINK => "lrwxrwxrwx",
            Self::GITLINK => "m---------",
            _ => "----------",
        }
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06o}", self.0)
    }
}

impl Serialize for FileMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";

    #[test]
    fn test_parse_sha1() {
        let id = ObjectId::parse(ID).unwrap();
        assert_eq!(id.as_str(), ID);
        assert_eq!(id.short(), "e69de29");
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let id: ObjectId = format!(" {}\n", ID.to_uppercase()).parse().unwrap();
        assert_eq!(id.as_str(), ID);
    }

    #[test]
    fn test_parse_sha256() {
        let hex = "a".repeat(SHA256_HEX_LEN);
        assert!(ObjectId::parse(&hex).is_ok());
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = ObjectId::parse("e69de29").unwrap_err();
        assert!(matches!(err, RevtreeError::InvalidObjectId { .. }));
    }

    #[test]
    fn test_rejects_non_hex() {
        let bad = "g".repeat(SHA1_HEX_LEN);
        assert!(ObjectId::parse(&bad).is_err());
    }

    #[test]
    fn test_object_kind_parse() {
        assert_eq!("tree".parse::<ObjectKind>().unwrap(), ObjectKind::Tree);
        assert_eq!("commit".parse::<ObjectKind>().unwrap(), ObjectKind::Commit);
        assert!("tag".parse::<ObjectKind>().is_err());
    }

    #[test]
    fn test_file_mode_permissions() {
        assert_eq!(FileMode::parse("040000").unwrap().permissions(), "drwxr-xr-x");
        assert_eq!(FileMode::parse("100644").unwrap().permissions(), "-rw-r--r--");
        assert_eq!(FileMode::parse("100755").unwrap().permissions(), "-rwxr-xr-x");
        assert_eq!(FileMode::parse("120000").unwrap().permissions(), "lrwxrwxrwx");
        assert_eq!(FileMode::parse("160000").unwrap().permissions(), "m---------");
        assert_eq!(FileMode(0o100664).permissions(), "----------");
    }

    #[test]
    fn test_file_mode_display_roundtrips_octal() {
        assert_eq!(FileMode::TREE.to_string(), "040000");
        assert!(FileMode::parse("10064x").is_err());
    }
}
