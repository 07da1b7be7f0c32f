//! Listing mode for CLI integration
//!
//! Prints one directory of a revision to stdout and exits (`--list`).

use std::io::{self, Write};
use std::str::FromStr;

use serde::Serialize;

use crate::tree::{TreeEntry, TreeNavigator};
use crate::view::TreeColumns;

/// Exit codes for CLI integration
pub mod exit_code {
    /// Normal exit
    pub const SUCCESS: i32 = 0;
    /// Runtime error occurred
    pub const ERROR: i32 = 2;
    /// Invalid arguments or options (e.g., unknown flag, invalid format)
    pub const INVALID: i32 = 3;
}

/// Output format for listed entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One tab-separated entry per line (default)
    #[default]
    Lines,
    /// JSON array
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lines" | "line" => Ok(Self::Lines),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

#[derive(Serialize)]
struct ListedEntry<'a> {
    #[serde(flatten)]
    entry: &'a TreeEntry,
    /// Path from the repository root
    path: String,
}

/// Load the navigator's directory and print it to stdout
pub fn output_listing(
    navigator: &mut TreeNavigator,
    format: OutputFormat,
    columns: &TreeColumns,
) -> anyhow::Result<()> {
    navigator.load()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_listing(&mut handle, navigator, format, columns)?;
    handle.flush()?;
    Ok(())
}

/// Write the loaded entries of `navigator`, skipping `..`
pub fn write_listing<W: Write>(
    out: &mut W,
    navigator: &TreeNavigator,
    format: OutputFormat,
    columns: &TreeColumns,
) -> io::Result<()> {
    let entries = navigator.entries().iter().filter(|e| !e.is_parent());

    match format {
        OutputFormat::Lines => {
            for entry in entries {
                writeln!(out, "{}", listing_line(entry, columns))?;
            }
        }
        OutputFormat::Json => {
            let listed: Vec<ListedEntry> = entries
                .map(|entry| ListedEntry {
                    entry,
                    path: navigator.entry_path(entry),
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &listed).map_err(io::Error::other)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// `<mode> <kind> <id> <size> <date> <author> <name>`, tab-separated
pub fn listing_line(entry: &TreeEntry, columns: &TreeColumns) -> String {
    let size = entry
        .size
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    let date = if entry.time.is_some() {
        columns.format_date(entry)
    } else {
        "-".to_string()
    };
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        entry.mode,
        entry.kind.as_str(),
        entry.id,
        size,
        date,
        entry.author.as_deref().unwrap_or("-"),
        entry.name
    )
}
