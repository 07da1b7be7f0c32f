//! revtree - browse the tree of a git revision in the terminal
//!
//! Lists the directories of a commit with the author and date of each
//! entry's last change, shows blobs with syntax highlighting, and opens any
//! blob in the user's editor.

pub mod app;
pub mod core;
pub mod editor;
pub mod error;
pub mod git;
pub mod handler;
pub mod integrate;
pub mod logging;
pub mod render;
pub mod tree;
pub mod view;

pub use editor::open_blob_editor;
pub use error::{Result, RevtreeError};
