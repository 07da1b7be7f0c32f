//! Tree entry (node) definition

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::git::{CommitStamp, FileMode, LsTreeRecord, ObjectId, ObjectKind};

/// Name of the synthetic entry leading back to the parent directory
pub const PARENT_NAME: &str = "..";

/// A single entry of a listed directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub kind: ObjectKind,
    pub id: ObjectId,
    /// Blob size in bytes
    pub size: Option<u64>,
    /// Name relative to the listed directory
    pub name: String,
    /// Author of the newest commit touching this entry
    pub author: Option<String>,
    /// Author date of that commit
    pub time: Option<DateTime<FixedOffset>>,
}

impl TreeEntry {
    /// The `..` entry of a non-root directory
    pub fn parent(commit: ObjectId) -> Self {
        Self {
            mode: FileMode::TREE,
            kind: ObjectKind::Tree,
            id: commit,
            size: None,
            name: PARENT_NAME.to_string(),
            author: None,
            time: None,
        }
    }

    pub fn is_parent(&self) -> bool {
        self.name == PARENT_NAME
    }

    pub fn is_dir(&self) -> bool {
        self.kind == ObjectKind::Tree
    }

    pub fn is_blob(&self) -> bool {
        self.kind == ObjectKind::Blob
    }

    pub fn is_submodule(&self) -> bool {
        self.kind == ObjectKind::Commit
    }

    /// Attach last-change information
    pub fn annotate(&mut self, stamp: &CommitStamp) {
        self.author = Some(stamp.author.clone());
        self.time = Some(stamp.time);
    }
}

impl From<LsTreeRecord> for TreeEntry {
    fn from(record: LsTreeRecord) -> Self {
        Self {
            mode: record.mode,
            kind: record.kind,
            id: record.id,
            size: record.size,
            name: record.name,
            author: None,
            time: None,
        }
    }
}
