//! Input mode definitions

/// Current input mode with embedded state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputMode {
    /// Normal browsing mode
    #[default]
    Browse,
    /// Typing a search pattern
    Search { query: String },
}

/// Direction of a repeated search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}
