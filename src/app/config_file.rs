//! Configuration file loading and parsing
//!
//! Loads configuration from `~/.config/revtree/config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

use crate::tree::{SortField, SortOrder};

/// Date format used when none (or an invalid one) is configured
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M %z";

/// Main configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// External editor settings
    pub editor: EditorConfig,
    /// Tree listing settings
    pub tree: TreeConfig,
    /// UI display settings
    pub ui: UiConfig,
}

/// External editor settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Editor command; falls back to git's editor resolution when unset
    pub command: Option<String>,
    /// Pass `+<line>` when opening a blob at a line
    pub line_number: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: None,
            line_number: true,
        }
    }
}

/// Tree listing settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Initial sort field: name, date, author or size
    pub sort: String,
    /// Reverse the initial sort order
    pub reverse: bool,
    /// Annotate entries with the author and date of their last change
    pub annotate: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            sort: "name".to_string(),
            reverse: false,
            annotate: true,
        }
    }
}

impl TreeConfig {
    /// Configured sort order; an unknown field falls back to name
    pub fn sort_order(&self) -> SortOrder {
        let field = self.sort.parse().unwrap_or_else(|e| {
            tracing::warn!("Ignoring tree.sort: {}", e);
            SortField::Name
        });
        SortOrder::new(field, self.reverse)
    }
}

/// UI display settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Date format string (strftime-style)
    pub date_format: String,
    /// Show abbreviated object ids in the tree view
    pub show_id: bool,
    /// Show blob sizes in the tree view
    pub show_size: bool,
    /// Syntax highlight blobs
    pub highlight: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            show_id: false,
            show_size: true,
            highlight: true,
        }
    }
}

impl UiConfig {
    /// Configured date format, or the default when it cannot be formatted
    pub fn date_format(&self) -> String {
        if is_valid_date_format(&self.date_format) {
            self.date_format.clone()
        } else {
            tracing::warn!("Ignoring invalid ui.date_format '{}'", self.date_format);
            DEFAULT_DATE_FORMAT.to_string()
        }
    }
}

/// Whether chrono can format with `format`
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

impl ConfigFile {
    /// Get the config directory path (~/.config/revtree)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("revtree"))
    }

    /// Get the config file path (~/.config/revtree/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// Returns default config if file doesn't exist or can't be parsed
    pub fn load() -> Self {
        Self::config_path()
            .filter(|path| path.exists())
            .and_then(|path| match Self::load_from(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Ignoring config {}: {}", path.display(), e);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Load configuration from a specific path (for testing)
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }
}
