//! Core module - Application state and input modes

pub mod mode;
pub mod state;

pub use mode::{InputMode, SearchDirection};
pub use state::{AppState, ViewState};
