//! Keymap configuration and registry
//!
//! Loads key bindings from `~/.config/revtree/keymap.toml`:
//!
//! ```toml
//! [bindings]
//! "ctrl+e" = "edit"
//! x = "quit"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::app::ConfigFile;
use crate::view::Request;

/// Keymap configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct KeymapFile {
    /// key string -> request name
    pub bindings: HashMap<String, String>,
}

impl KeymapFile {
    /// Get the keymap file path (~/.config/revtree/keymap.toml)
    pub fn keymap_path() -> Option<PathBuf> {
        ConfigFile::config_dir().map(|p| p.join("keymap.toml"))
    }

    /// Load keymap from the default location; empty when missing or invalid
    pub fn load() -> Self {
        Self::keymap_path()
            .filter(|path| path.exists())
            .and_then(|path| match Self::load_from(&path) {
                Ok(keymap) => Some(keymap),
                Err(e) => {
                    tracing::warn!("Ignoring keymap {}: {}", path.display(), e);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Load keymap from a specific path
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Key binding registry for request dispatch
pub struct KeyBindingRegistry {
    bindings: HashMap<String, Request>,
}

impl Default for KeyBindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindingRegistry {
    /// Create a new registry with default bindings
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
        };
        registry.load_defaults();
        registry
    }

    /// Load registry from keymap file, merging with defaults
    pub fn from_file() -> Self {
        let mut registry = Self::new();
        registry.merge(KeymapFile::load());
        registry
    }

    /// Apply user bindings over the current ones; unknown requests are skipped
    pub fn merge(&mut self, keymap: KeymapFile) {
        for (key, action) in keymap.bindings {
            match action.parse::<Request>() {
                Ok(request) => {
                    self.bindings.insert(normalize_key(&key), request);
                }
                Err(e) => tracing::warn!("Keymap entry '{}': {}", key, e),
            }
        }
    }

    fn load_defaults(&mut self) {
        let defaults = [
            ("q", Request::Close),
            ("Q", Request::Quit),
            ("ctrl+c", Request::Quit),
            ("j", Request::MoveDown),
            ("down", Request::MoveDown),
            ("k", Request::MoveUp),
            ("up", Request::MoveUp),
            ("pagedown", Request::PageDown),
            ("space", Request::PageDown),
            ("pageup", Request::PageUp),
            ("b", Request::PageUp),
            ("g", Request::MoveFirst),
            ("home", Request::MoveFirst),
            ("G", Request::MoveLast),
            ("end", Request::MoveLast),
            ("enter", Request::Enter),
            ("l", Request::Enter),
            ("right", Request::Enter),
            ("h", Request::Parent),
            ("left", Request::Parent),
            ("backspace", Request::Parent),
            ("e", Request::Edit),
            ("R", Request::Refresh),
            ("f5", Request::Refresh),
            ("/", Request::Search),
            ("n", Request::FindNext),
            ("N", Request::FindPrev),
            ("i", Request::SortName),
            ("d", Request::SortDate),
            ("a", Request::SortAuthor),
            ("s", Request::SortSize),
            ("r", Request::SortReverse),
        ];
        for (key, request) in defaults {
            self.bindings.insert(key.to_string(), request);
        }
    }

    /// Look up the request bound to a key event
    pub fn lookup(&self, key: &KeyEvent) -> Option<Request> {
        self.bindings.get(&key_event_to_string(key)).copied()
    }
}

/// Convert a KeyEvent to a string representation
fn key_event_to_string(key: &KeyEvent) -> String {
    let mut parts = Vec::new();

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("ctrl");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("alt");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        // Only add shift for non-character keys or when combined with ctrl/alt
        if !matches!(key.code, KeyCode::Char(_)) || !parts.is_empty() {
            parts.push("shift");
        }
    }

    let key_name = match key.code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("f{}", n),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::Esc => "esc".to_string(),
        _ => return String::new(),
    };

    if parts.is_empty() {
        key_name
    } else {
        parts.push(&key_name);
        parts.join("+")
    }
}

/// Lower-case modifiers and named keys; single characters keep their case
fn normalize_key(key: &str) -> String {
    match key.rsplit_once('+') {
        Some((modifiers, name)) if !modifiers.is_empty() && !name.is_empty() => {
            format!("{}+{}", modifiers.to_lowercase(), normalize_key_name(name))
        }
        _ => normalize_key_name(key),
    }
}

fn normalize_key_name(name: &str) -> String {
    if name.chars().count() == 1 {
        name.to_string()
    } else {
        name.to_lowercase()
    }
}
