//! Requests routed to views and their outcomes

use std::fmt;
use std::str::FromStr;

use crate::git::ObjectId;

/// A user request, produced by key bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Request {
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    MoveFirst,
    MoveLast,
    /// Open the selected line (directory, file)
    Enter,
    /// Go to the parent directory
    Parent,
    /// Open the selection in the external editor
    Edit,
    Refresh,
    SortName,
    SortDate,
    SortAuthor,
    SortSize,
    /// Flip the sort direction
    SortReverse,
    /// Start typing a search pattern
    Search,
    FindNext,
    FindPrev,
    /// Close the current view
    Close,
    Quit,
}

impl Request {
    /// Every request, in help order
    pub const ALL: [Request; 20] = [
        Request::MoveUp,
        Request::MoveDown,
        Request::PageUp,
        Request::PageDown,
        Request::MoveFirst,
        Request::MoveLast,
        Request::Enter,
        Request::Parent,
        Request::Edit,
        Request::Refresh,
        Request::SortName,
        Request::SortDate,
        Request::SortAuthor,
        Request::SortSize,
        Request::SortReverse,
        Request::Search,
        Request::FindNext,
        Request::FindPrev,
        Request::Close,
        Request::Quit,
    ];

    /// Name used in keymap files
    pub fn name(&self) -> &'static str {
        match self {
            Request::MoveUp => "move_up",
            Request::MoveDown => "move_down",
            Request::PageUp => "page_up",
            Request::PageDown => "page_down",
            Request::MoveFirst => "move_first",
            Request::MoveLast => "move_last",
            Request::Enter => "enter",
            Request::Parent => "parent",
            Request::Edit => "edit",
            Request::Refresh => "refresh",
            Request::SortName => "sort_name",
            Request::SortDate => "sort_date",
            Request::SortAuthor => "sort_author",
            Request::SortSize => "sort_size",
            Request::SortReverse => "sort_reverse",
            Request::Search => "search",
            Request::FindNext => "find_next",
            Request::FindPrev => "find_prev",
            Request::Close => "close",
            Request::Quit => "quit",
        }
    }
}

impl FromStr for Request {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Request::ALL
            .iter()
            .find(|r| r.name() == s)
            .copied()
            .ok_or_else(|| format!("unknown request '{}'", s))
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the dispatcher should do after a view handled a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Nothing further
    None,
    /// Show a status message
    Message(String),
    /// Re-open the current view
    Reload,
    /// Display the content of a blob
    OpenBlob { id: ObjectId, name: String },
    /// Open a blob in the external editor (1-based line, 0 = none)
    Edit {
        id: ObjectId,
        name: String,
        lineno: u32,
    },
    /// Close the current view
    Close,
}

impl RequestOutcome {
    pub fn message(msg: impl Into<String>) -> Self {
        Self::Message(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keymap_names() {
        assert_eq!("edit".parse::<Request>().unwrap(), Request::Edit);
        assert_eq!("sort_reverse".parse::<Request>().unwrap(), Request::SortReverse);
        assert_eq!("parent".parse::<Request>().unwrap(), Request::Parent);
    }

    #[test]
    fn test_unknown_name() {
        assert!("explode".parse::<Request>().is_err());
    }
}
