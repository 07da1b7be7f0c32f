//! Tree navigator - lists one directory of a commit at a time

use std::collections::HashSet;

use super::{DirStack, SortOrder, TreeEntry};
use crate::error::Result;
use crate::git::{GitRepo, ObjectId};

/// Walks the directories of a single commit
pub struct TreeNavigator {
    repo: GitRepo,
    commit: ObjectId,
    stack: DirStack,
    entries: Vec<TreeEntry>,
    sort: SortOrder,
    /// Whether to look up last-change author/date per entry
    annotate: bool,
}

impl TreeNavigator {
    /// Create a navigator positioned at `start_path`; nothing is loaded yet
    pub fn new(repo: GitRepo, commit: ObjectId, start_path: &str) -> Self {
        Self {
            repo,
            commit,
            stack: DirStack::from_path(start_path),
            entries: Vec::new(),
            sort: SortOrder::default(),
            annotate: true,
        }
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_annotation(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    pub fn repo(&self) -> &GitRepo {
        &self.repo
    }

    pub fn commit(&self) -> &ObjectId {
        &self.commit
    }

    /// Current directory as `""` or `"a/b/"`
    pub fn path(&self) -> String {
        self.stack.path()
    }

    pub fn is_root(&self) -> bool {
        self.stack.is_root()
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    /// Repository path of an entry in the current directory
    pub fn entry_path(&self, entry: &TreeEntry) -> String {
        format!("{}{}", self.stack.path(), entry.name)
    }

    /// Read the current directory from the repository
    pub fn load(&mut self) -> Result<()> {
        let dir = self.stack.path();
        let mut entries: Vec<TreeEntry> = self
            .repo
            .list_tree(&self.commit, &dir)?
            .into_iter()
            .map(TreeEntry::from)
            .collect();

        if self.annotate {
            self.annotate_entries(&dir, &mut entries);
        }
        if !self.stack.is_root() {
            entries.push(TreeEntry::parent(self.commit.clone()));
        }
        self.sort.sort(&mut entries);

        tracing::debug!("Loaded {} entries for '{}'", entries.len(), dir);
        self.entries = entries;
        Ok(())
    }

    fn annotate_entries(&self, dir: &str, entries: &mut [TreeEntry]) {
        let names: HashSet<String> = entries.iter().map(|e| e.name.clone()).collect();
        match self.repo.annotate_entries(&self.commit, dir, &names) {
            Ok(stamps) => {
                for entry in entries.iter_mut() {
                    if let Some(stamp) = stamps.get(&entry.name) {
                        entry.annotate(stamp);
                    }
                }
            }
            Err(e) => tracing::warn!("Failed to annotate '{}': {}", dir, e),
        }
    }

    /// Enter the sub-directory `name`, remembering `lineno` in the parent
    pub fn enter(&mut self, name: &str, lineno: usize) -> Result<()> {
        self.stack.push(name, lineno);
        if let Err(e) = self.load() {
            self.stack.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Go up one level; returns the line selected when the child was entered
    pub fn leave(&mut self) -> Result<Option<usize>> {
        let Some((name, lineno)) = self.stack.pop_frame() else {
            return Ok(None);
        };
        if let Err(e) = self.load() {
            self.stack.push(&name, lineno);
            return Err(e);
        }
        Ok(Some(lineno))
    }

    /// Change ordering and re-sort the loaded entries
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
        self.sort.sort(&mut self.entries);
    }
}
