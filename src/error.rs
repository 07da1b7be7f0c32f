//! Unified error types for revtree
//!
//! Library modules return [`Result`]; the binary edge converts into `anyhow`.

/// Unified error type for revtree operations
#[derive(Debug, thiserror::Error)]
pub enum RevtreeError {
    /// I/O errors (temp files, process pipes, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Git command failures
    #[error("Git error: {0}")]
    Git(String),

    /// Malformed object name
    #[error("Invalid object id: {value} - {reason}")]
    InvalidObjectId { value: String, reason: String },

    /// External editor errors
    #[error("Editor error: {0}")]
    Editor(String),

    /// View dispatch errors
    #[error("View error: {0}")]
    View(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience Result type using RevtreeError
pub type Result<T> = std::result::Result<T, RevtreeError>;

impl RevtreeError {
    /// Create a Git error
    pub fn git(msg: impl Into<String>) -> Self {
        Self::Git(msg.into())
    }

    /// Create an InvalidObjectId error
    pub fn invalid_object_id(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidObjectId {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an Editor error
    pub fn editor(msg: impl Into<String>) -> Self {
        Self::Editor(msg.into())
    }

    /// Create a View error
    pub fn view(msg: impl Into<String>) -> Self {
        Self::View(msg.into())
    }

    /// Create a Config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an Internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
