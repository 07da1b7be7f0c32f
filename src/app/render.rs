//! Rendering helpers for the event loop

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::dispatch::Dispatcher;
use crate::render::{render_status_bar, visible_height, STATUS_HEIGHT};

/// Split the screen into the view area and the status bar
pub fn layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Number of lines the current view can show on a screen of `area`
pub fn view_height(area: Rect) -> usize {
    visible_height(layout(area).0)
}

/// Render a complete frame
pub fn render_frame(frame: &mut Frame, dispatcher: &Dispatcher) {
    let (view_area, status_area) = layout(frame.area());

    match dispatcher.views().current() {
        Some((view, state)) => view.draw(frame, view_area, state),
        None => {
            let block = Block::default().borders(Borders::ALL);
            frame.render_widget(Paragraph::new("No view").block(block), view_area);
        }
    }

    render_status_bar(
        frame,
        status_area,
        dispatcher.state(),
        &dispatcher.status_info(),
    );
}
