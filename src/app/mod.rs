//! Application module
//!
//! This module contains the main application logic, configuration,
//! request dispatch and event loop for revtree.

mod config;
mod config_file;
mod dispatch;
mod event_loop;
mod render;

pub use config::{print_help, Config, RunMode};
pub use config_file::{ConfigFile, EditorConfig, TreeConfig, UiConfig, DEFAULT_DATE_FORMAT};
pub use dispatch::{Dispatcher, PendingEdit};
pub use event_loop::run_app;
pub use render::{render_frame, view_height};
