//! Tree view: browse the directories of a commit

use chrono::{DateTime, FixedOffset};
use ratatui::{layout::Rect, Frame};
use regex::Regex;

use super::{Request, RequestOutcome, ViewKind, ViewOps};
use crate::core::ViewState;
use crate::error::Result;
use crate::render::render_tree;
use crate::tree::{SortField, TreeEntry, TreeNavigator};

/// Optional columns of the tree listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeColumns {
    pub show_id: bool,
    pub show_date: bool,
    pub show_size: bool,
    /// strftime-style format for the date column
    pub date_format: String,
}

impl Default for TreeColumns {
    fn default() -> Self {
        Self {
            show_id: false,
            show_date: true,
            show_size: true,
            date_format: "%Y-%m-%d %H:%M %z".to_string(),
        }
    }
}

impl TreeColumns {
    /// Formatted date of the entry's last change, or empty
    pub fn format_date(&self, entry: &TreeEntry) -> String {
        entry
            .time
            .map(|time| self.format_time(&time))
            .unwrap_or_default()
    }

    fn format_time(&self, time: &DateTime<FixedOffset>) -> String {
        time.format(&self.date_format).to_string()
    }

    /// Width of the date column
    pub fn date_width(&self) -> usize {
        DateTime::from_timestamp(978_307_199, 0)
            .map(|t| self.format_time(&t.fixed_offset()).chars().count())
            .unwrap_or(0)
    }
}

/// The tree view's operations
pub struct TreeView {
    navigator: TreeNavigator,
    columns: TreeColumns,
}

impl TreeView {
    pub fn new(navigator: TreeNavigator, columns: TreeColumns) -> Self {
        Self { navigator, columns }
    }

    pub fn navigator(&self) -> &TreeNavigator {
        &self.navigator
    }

    /// Entry on the selected line
    pub fn selected<'a>(&'a self, state: &ViewState) -> Option<&'a TreeEntry> {
        self.navigator.entries().get(state.lineno)
    }

    fn enter(&mut self, name: &str, state: &mut ViewState) -> Result<RequestOutcome> {
        self.navigator.enter(name, state.lineno)?;
        *state = ViewState::default();
        Ok(RequestOutcome::None)
    }

    fn leave(&mut self, state: &mut ViewState) -> Result<RequestOutcome> {
        match self.navigator.leave()? {
            Some(lineno) => {
                state.move_to(lineno, self.line_count());
                Ok(RequestOutcome::None)
            }
            None => Ok(RequestOutcome::message("Already at the root directory")),
        }
    }

    /// Re-sort keeping the same entry selected
    fn resort(&mut self, field: Option<SortField>, state: &mut ViewState) -> RequestOutcome {
        let selected = self.selected(state).map(|e| e.name.clone());

        let mut order = self.navigator.sort_order();
        match field {
            Some(field) => order.select(field),
            None => order.reverse = !order.reverse,
        }
        self.navigator.set_sort(order);

        if let Some(name) = selected {
            if let Some(index) = self.navigator.entries().iter().position(|e| e.name == name) {
                state.move_to(index, self.line_count());
            }
        }
        RequestOutcome::message(format!("Sorting by {}", order.label()))
    }
}

impl ViewOps for TreeView {
    fn kind(&self) -> ViewKind {
        ViewKind::Tree
    }

    fn title(&self) -> String {
        format!(
            "tree {}:/{}",
            self.navigator.commit().short(),
            self.navigator.path()
        )
    }

    fn open(&mut self, state: &mut ViewState) -> Result<()> {
        self.navigator.load()?;
        state.move_to(state.lineno, self.line_count());
        Ok(())
    }

    fn line_count(&self) -> usize {
        self.navigator.entries().len()
    }

    fn draw(&self, frame: &mut Frame, area: Rect, state: &ViewState) {
        render_tree(
            frame,
            area,
            &self.title(),
            self.navigator.entries(),
            state,
            &self.columns,
        );
    }

    fn request(&mut self, request: Request, state: &mut ViewState) -> Result<RequestOutcome> {
        let Some(entry) = self.selected(state).cloned() else {
            return Ok(match request {
                Request::Parent => return self.leave(state),
                Request::Refresh => RequestOutcome::Reload,
                _ => RequestOutcome::None,
            });
        };

        match request {
            Request::Enter if entry.is_parent() => self.leave(state),
            Request::Enter if entry.is_dir() => self.enter(&entry.name, state),
            Request::Enter if entry.is_submodule() => {
                Ok(RequestOutcome::message("Submodules cannot be browsed"))
            }
            Request::Enter => Ok(RequestOutcome::OpenBlob {
                name: self.navigator.entry_path(&entry),
                id: entry.id,
            }),
            Request::Parent => self.leave(state),
            Request::Edit if entry.is_dir() => Ok(RequestOutcome::message("Cannot edit a directory")),
            Request::Edit if entry.is_submodule() => {
                Ok(RequestOutcome::message("Cannot edit a submodule"))
            }
            Request::Edit => Ok(RequestOutcome::Edit {
                name: self.navigator.entry_path(&entry),
                id: entry.id,
                lineno: 0,
            }),
            Request::Refresh => Ok(RequestOutcome::Reload),
            Request::SortName => Ok(self.resort(Some(SortField::Name), state)),
            Request::SortDate => Ok(self.resort(Some(SortField::Date), state)),
            Request::SortAuthor => Ok(self.resort(Some(SortField::Author), state)),
            Request::SortSize => Ok(self.resort(Some(SortField::Size), state)),
            Request::SortReverse => Ok(self.resort(None, state)),
            _ => Ok(RequestOutcome::None),
        }
    }

    fn select(&self, state: &ViewState) -> Option<String> {
        let entry = self.selected(state)?;
        let path = self.navigator.entry_path(entry);
        let text = if entry.is_parent() {
            "Parent directory".to_string()
        } else if entry.is_dir() {
            format!("Directory path /{}", path)
        } else if entry.is_submodule() {
            format!("Submodule path /{}", path)
        } else {
            format!("File path /{}", path)
        };
        Some(text)
    }

    fn grep(&self, lineno: usize, pattern: &Regex) -> bool {
        let Some(entry) = self.navigator.entries().get(lineno) else {
            return false;
        };
        pattern.is_match(&entry.name)
            || entry.author.as_deref().is_some_and(|a| pattern.is_match(a))
            || (entry.time.is_some() && pattern.is_match(&self.columns.format_date(entry)))
    }

    fn status(&self) -> Option<String> {
        Some(format!("sort: {}", self.navigator.sort_order().label()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::parse_author;

    #[test]
    fn test_date_width_matches_format() {
        let columns = TreeColumns {
            date_format: "%Y-%m-%d".to_string(),
            ..TreeColumns::default()
        };
        assert_eq!(columns.date_width(), 10);
        assert_eq!(TreeColumns::default().date_width(), "2000-12-31 23:59 +0000".len());
    }

    #[test]
    fn test_format_date_uses_entry_offset() {
        let (_, time) = parse_author("X <x@y> 1700000000 +0200").unwrap();
        let entry = TreeEntry {
            time: Some(time),
            ..TreeEntry::parent(crate::git::ObjectId::parse(&"1".repeat(40)).unwrap())
        };
        let columns = TreeColumns::default();
        assert_eq!(columns.format_date(&entry), "2023-11-15 00:13 +0200");
    }
}
