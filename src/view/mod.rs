//! Pluggable views
//!
//! Every screen implements [`ViewOps`]; the dispatcher drives whichever view
//! is on top of the [`ViewRegistry`] display stack without knowing its kind.

pub mod blob;
pub mod registry;
pub mod request;
pub mod tree;

use ratatui::{layout::Rect, Frame};
use regex::Regex;

use crate::core::ViewState;
use crate::error::Result;

pub use blob::BlobView;
pub use registry::ViewRegistry;
pub use request::{Request, RequestOutcome};
pub use tree::{TreeColumns, TreeView};

/// Kinds of views the application can host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Tree,
    Blob,
}

impl ViewKind {
    pub fn name(&self) -> &'static str {
        match self {
            ViewKind::Tree => "tree",
            ViewKind::Blob => "blob",
        }
    }
}

/// Operations a view provides to be hosted by the dispatcher
pub trait ViewOps {
    fn kind(&self) -> ViewKind;

    /// Title shown in the view border
    fn title(&self) -> String;

    /// (Re)load content; may reposition `state`
    fn open(&mut self, state: &mut ViewState) -> Result<()>;

    /// Number of selectable lines
    fn line_count(&self) -> usize;

    /// Render the visible window of lines
    fn draw(&self, frame: &mut Frame, area: Rect, state: &ViewState);

    /// Handle a view-specific request
    fn request(&mut self, request: Request, state: &mut ViewState) -> Result<RequestOutcome>;

    /// Status text describing the selected line
    fn select(&self, state: &ViewState) -> Option<String>;

    /// Whether line `lineno` matches `pattern`
    fn grep(&self, lineno: usize, pattern: &Regex) -> bool;

    /// Extra text for the right side of the status bar
    fn status(&self) -> Option<String> {
        None
    }
}
