//! Render module - UI rendering

pub mod status;
pub mod text;
pub mod tree;

pub use status::{position_info, render_status_bar, STATUS_HEIGHT};
pub use text::{highlight_content, render_text, StyledLine, StyledSegment};
pub use tree::{author_width, display_name, entry_text, format_size, render_tree, visible_height};
