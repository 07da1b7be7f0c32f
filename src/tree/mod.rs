//! Tree module - revision tree entries and navigation

pub mod navigator;
pub mod node;
pub mod sort;
pub mod stack;

pub use navigator::TreeNavigator;
pub use node::{TreeEntry, PARENT_NAME};
pub use sort::{SortField, SortOrder};
pub use stack::DirStack;
