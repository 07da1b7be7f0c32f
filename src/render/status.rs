//! Status bar rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::{AppState, InputMode};

/// Height of the status bar including borders
pub const STATUS_HEIGHT: u16 = 3;

const HINT: &str = "enter: open  e: edit  /: search  q: close";

/// Render the status bar: message or search prompt on the left,
/// view position information on the right
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, info: &str) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = match &state.mode {
        InputMode::Search { query } => Line::from(vec![
            Span::styled("/", Style::default().fg(Color::Yellow)),
            Span::raw(query.clone()),
            Span::styled("_", Style::default().fg(Color::DarkGray)),
        ]),
        InputMode::Browse => Line::from(vec![Span::raw(format!(
            " {}",
            state.message.as_deref().unwrap_or(HINT)
        ))]),
    };
    let msg_widget = Paragraph::new(left).block(Block::default().borders(Borders::ALL));
    frame.render_widget(msg_widget, chunks[0]);

    let info_widget = Paragraph::new(info.to_string())
        .alignment(ratatui::layout::Alignment::Right)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(info_widget, chunks[1]);
}

/// Right-hand status text, e.g. `tree  12/40  sort: date (rev)`
pub fn position_info(view: &str, lineno: usize, count: usize, extra: Option<&str>) -> String {
    let position = if count == 0 {
        "0/0".to_string()
    } else {
        format!("{}/{}", lineno + 1, count)
    };
    match extra {
        Some(extra) => format!("{}  {}  {} ", view, position, extra),
        None => format!("{}  {} ", view, position),
    }
}
