//! Entry ordering
//!
//! `..` always comes first and directories precede everything else; the
//! selected field (optionally reversed) orders the rest.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::TreeEntry;

/// Field used to order tree entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    /// Byte-wise name order (matches git)
    #[default]
    Name,
    /// Date of the last change, oldest first
    Date,
    /// Author of the last change
    Author,
    /// Blob size, smallest first
    Size,
}

impl SortField {
    /// Get display name for status bar
    pub fn display_name(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Date => "date",
            SortField::Author => "author",
            SortField::Size => "size",
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "date" => Ok(SortField::Date),
            "author" => Ok(SortField::Author),
            "size" => Ok(SortField::Size),
            other => Err(format!(
                "Invalid sort field '{}'. Valid fields: name, date, author, size",
                other
            )),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Active sort field and direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub reverse: bool,
}

impl SortOrder {
    pub fn new(field: SortField, reverse: bool) -> Self {
        Self { field, reverse }
    }

    /// Switch to `field`; choosing the active field again flips direction
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.reverse = !self.reverse;
        } else {
            self.field = field;
            self.reverse = false;
        }
    }

    pub fn compare(&self, a: &TreeEntry, b: &TreeEntry) -> Ordering {
        match (a.is_parent(), b.is_parent()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (true, true) => return Ordering::Equal,
            (false, false) => {}
        }

        match (a.is_dir(), b.is_dir()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }

        let by_name = || a.name.as_bytes().cmp(b.name.as_bytes());
        let ordering = match self.field {
            SortField::Name => by_name(),
            SortField::Date => a.time.cmp(&b.time).then_with(by_name),
            SortField::Author => a.author.cmp(&b.author).then_with(by_name),
            SortField::Size => a.size.cmp(&b.size).then_with(by_name),
        };

        if self.reverse {
            ordering.reverse()
        } else {
            ordering
        }
    }

    pub fn sort(&self, entries: &mut [TreeEntry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }

    /// Short label such as `date` or `date (rev)`
    pub fn label(&self) -> String {
        if self.reverse {
            format!("{} (rev)", self.field)
        } else {
            self.field.to_string()
        }
    }
}
