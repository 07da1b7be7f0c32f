//! Git integration module
//!
//! Repository access goes through the `git` executable; see [`GitRepo`].

mod blob;
mod log;
mod ls_tree;
mod object;
mod operations;

pub use blob::{is_binary, BlobSource};
pub use log::{parse_author, scan_log, CommitStamp};
pub use ls_tree::{parse_ls_tree, LsTreeRecord};
pub use object::{FileMode, ObjectId, ObjectKind, SHORT_LEN};
pub use operations::{find_git_executable, GitRepo};
