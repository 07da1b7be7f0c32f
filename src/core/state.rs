//! Application and per-view state

use regex::Regex;

use super::InputMode;

/// Selection and scroll position of a single view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Selected line
    pub lineno: usize,
    /// First visible line
    pub offset: usize,
}

impl ViewState {
    /// Select `lineno`, clamped to `[0, count - 1]`
    pub fn move_to(&mut self, lineno: usize, count: usize) {
        self.lineno = if count == 0 {
            0
        } else {
            lineno.min(count - 1)
        };
    }

    /// Move the selection by `delta` lines, stopping at either end
    pub fn move_by(&mut self, delta: isize, count: usize) {
        let target = if delta < 0 {
            self.lineno.saturating_sub(delta.unsigned_abs())
        } else {
            self.lineno.saturating_add(delta as usize)
        };
        self.move_to(target, count);
    }

    /// Keep the selection within the visible window
    pub fn adjust_viewport(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.lineno < self.offset {
            self.offset = self.lineno;
        } else if self.lineno >= self.offset + visible_height {
            self.offset = self.lineno.saturating_sub(visible_height) + 1;
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current input mode
    pub mode: InputMode,
    /// Status message
    pub message: Option<String>,
    /// Last submitted search pattern
    pub search: Option<Regex>,
    /// Exit flag
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Clear status message
    pub fn clear_message(&mut self) {
        self.message = None;
    }
}
