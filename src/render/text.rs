//! Blob text rendering with syntax highlighting

use std::path::Path;
use std::sync::OnceLock;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::core::ViewState;

/// Lazy-initialized syntax set (100+ languages)
static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();

/// Lazy-initialized theme (base16-ocean.dark)
static THEME: OnceLock<Theme> = OnceLock::new();

fn get_syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn get_theme() -> &'static Theme {
    THEME.get_or_init(|| {
        let ts = ThemeSet::load_defaults();
        ts.themes["base16-ocean.dark"].clone()
    })
}

/// A segment of styled text (text with color)
#[derive(Debug, Clone, PartialEq)]
pub struct StyledSegment {
    pub text: String,
    pub color: Color,
}

/// A line with syntax highlighting
#[derive(Debug, Clone, PartialEq)]
pub struct StyledLine {
    pub segments: Vec<StyledSegment>,
}

/// Highlight `content` using the syntax detected from `name`
///
/// Falls back to first-line detection (shebangs); `None` for unknown syntax.
pub fn highlight_content(content: &str, name: &str) -> Option<Vec<StyledLine>> {
    let ss = get_syntax_set();
    let theme = get_theme();

    let syntax = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| ss.find_syntax_by_extension(ext))
        .or_else(|| ss.find_syntax_by_first_line(content.lines().next().unwrap_or("")))?;

    let mut h = HighlightLines::new(syntax, theme);
    let mut styled_lines = Vec::new();

    for line in LinesWithEndings::from(content) {
        let ranges = h.highlight_line(line, ss).ok()?;
        let segments = ranges
            .iter()
            .map(|(style, text)| StyledSegment {
                text: text.trim_end_matches(['\n', '\r']).to_string(),
                color: Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b),
            })
            .collect();
        styled_lines.push(StyledLine { segments });
    }

    Some(styled_lines)
}

/// Render numbered text lines, highlighting the selected one
pub fn render_text(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    lines: &[String],
    styled_lines: Option<&[StyledLine]>,
    state: &ViewState,
) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let start = state.offset.min(lines.len());
    let end = (start + visible_height).min(lines.len());
    let number_width = lines.len().to_string().len().max(4);

    let rendered: Vec<Line> = (start..end)
        .map(|index| {
            let mut spans = vec![Span::styled(
                format!("{:>width$} ", index + 1, width = number_width),
                Style::default().fg(Color::DarkGray),
            )];

            match styled_lines.and_then(|styled| styled.get(index)) {
                Some(styled) => spans.extend(styled.segments.iter().map(|segment| {
                    Span::styled(segment.text.clone(), Style::default().fg(segment.color))
                })),
                None => spans.push(Span::raw(lines[index].clone())),
            }

            let line = Line::from(spans);
            if index == state.lineno {
                line.style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            } else {
                line
            }
        })
        .collect();

    let widget = Paragraph::new(rendered).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title)),
    );

    frame.render_widget(widget, area);
}
