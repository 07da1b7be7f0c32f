//! Tree listing rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::core::ViewState;
use crate::tree::TreeEntry;
use crate::view::TreeColumns;

/// Widest author column before names are truncated
const MAX_AUTHOR_WIDTH: usize = 20;

/// Render the tree listing widget
pub fn render_tree(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    entries: &[TreeEntry],
    state: &ViewState,
    columns: &TreeColumns,
) {
    let visible_height = visible_height(area);
    let author_width = author_width(entries);

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .skip(state.offset)
        .take(visible_height)
        .map(|(index, entry)| {
            let spans = entry_spans(entry, columns, author_width);
            let mut item = ListItem::new(Line::from(spans));
            if index == state.lineno {
                item = item.style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                );
            }
            item
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title)),
    );
    frame.render_widget(list, area);
}

/// Styled columns of a single entry
fn entry_spans(entry: &TreeEntry, columns: &TreeColumns, author_width: usize) -> Vec<Span<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![Span::styled(format!("{} ", entry.mode.permissions()), dim)];

    if columns.show_id {
        let id = if entry.is_parent() {
            " ".repeat(crate::git::SHORT_LEN)
        } else {
            entry.id.short().to_string()
        };
        spans.push(Span::styled(format!("{} ", id), Style::default().fg(Color::Magenta)));
    }

    if author_width > 0 {
        let author = truncate(entry.author.as_deref().unwrap_or(""), author_width);
        spans.push(Span::styled(
            format!("{:<width$} ", author, width = author_width),
            Style::default().fg(Color::Green),
        ));
    }

    if columns.show_date {
        let date = columns.format_date(entry);
        spans.push(Span::styled(
            format!("{:<width$} ", date, width = columns.date_width()),
            Style::default().fg(Color::Blue),
        ));
    }

    if columns.show_size {
        let size = entry.size.map(format_size).unwrap_or_default();
        spans.push(Span::styled(format!("{:>9} ", size), dim));
    }

    spans.push(Span::styled(display_name(entry), name_style(entry)));
    spans
}

/// Plain-text rendering of an entry row (used by tests and `--list`)
pub fn entry_text(entry: &TreeEntry, columns: &TreeColumns, author_width: usize) -> String {
    entry_spans(entry, columns, author_width)
        .iter()
        .map(|span| span.content.as_ref())
        .collect()
}

/// Name with a trailing `/` for directories
pub fn display_name(entry: &TreeEntry) -> String {
    if entry.is_dir() && !entry.is_parent() {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    }
}

fn name_style(entry: &TreeEntry) -> Style {
    if entry.is_parent() {
        Style::default().add_modifier(Modifier::BOLD)
    } else if entry.is_dir() {
        Style::default().fg(Color::Blue)
    } else if entry.is_submodule() {
        Style::default().fg(Color::Magenta)
    } else if entry.mode.is_symlink() {
        Style::default().fg(Color::Cyan)
    } else if entry.mode.is_executable() {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

/// Width of the author column (0 when no entry is annotated)
pub fn author_width(entries: &[TreeEntry]) -> usize {
    entries
        .iter()
        .filter_map(|e| e.author.as_deref())
        .map(|a| a.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_AUTHOR_WIDTH)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}

/// Format bytes as human-readable string
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Calculate visible height for a bordered list area
pub fn visible_height(area: Rect) -> usize {
    area.height.saturating_sub(2) as usize
}
