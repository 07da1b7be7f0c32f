//! Request dispatch
//!
//! Generic requests (movement, search, closing views) are handled here for
//! every view; everything else goes to the current view's `request` and the
//! returned outcome is applied.

use regex::Regex;

use crate::core::{AppState, InputMode, SearchDirection};
use crate::git::{GitRepo, ObjectId};
use crate::handler::{update_input_buffer, KeyAction};
use crate::render::position_info;
use crate::view::{BlobView, Request, RequestOutcome, ViewKind, ViewRegistry};

/// A blob waiting to be opened in the external editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub id: ObjectId,
    pub name: String,
    pub lineno: u32,
}

/// Owns the views and application state of an interactive session
pub struct Dispatcher {
    views: ViewRegistry,
    state: AppState,
    repo: GitRepo,
    highlight: bool,
}

impl Dispatcher {
    /// Wrap a registry whose first view is already displayed
    pub fn new(views: ViewRegistry, repo: GitRepo) -> Self {
        let mut dispatcher = Self {
            views,
            state: AppState::new(),
            repo,
            highlight: true,
        };
        dispatcher.show_selection();
        dispatcher
    }

    pub fn with_highlighting(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn views(&self) -> &ViewRegistry {
        &self.views
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    /// Right-hand status bar text for the current view
    pub fn status_info(&self) -> String {
        match self.views.current() {
            Some((view, state)) => position_info(
                view.kind().name(),
                state.lineno,
                view.line_count(),
                view.status().as_deref(),
            ),
            None => String::new(),
        }
    }

    /// Apply a key action; returns a blob to edit if one was requested
    pub fn handle_action(&mut self, action: KeyAction, visible_height: usize) -> Option<PendingEdit> {
        match action {
            KeyAction::None => None,
            KeyAction::Request(request) => self.dispatch(request, visible_height),
            KeyAction::SearchInput(_) | KeyAction::SearchBackspace => {
                update_input_buffer(&mut self.state, &action);
                None
            }
            KeyAction::CancelSearch => {
                self.state.mode = InputMode::Browse;
                self.show_selection();
                None
            }
            KeyAction::SubmitSearch { query } => {
                self.state.mode = InputMode::Browse;
                self.submit_search(&query, visible_height);
                None
            }
        }
    }

    /// Handle one request
    pub fn dispatch(&mut self, request: Request, visible_height: usize) -> Option<PendingEdit> {
        self.state.clear_message();
        let page = visible_height.max(1) as isize;

        let pending = match request {
            Request::MoveUp => self.move_by(-1),
            Request::MoveDown => self.move_by(1),
            Request::PageUp => self.move_by(-page),
            Request::PageDown => self.move_by(page),
            Request::MoveFirst => self.move_to(0),
            Request::MoveLast => self.move_to(usize::MAX),
            Request::Search => {
                self.state.mode = InputMode::Search {
                    query: String::new(),
                };
                None
            }
            Request::FindNext => {
                self.find(SearchDirection::Forward);
                None
            }
            Request::FindPrev => {
                self.find(SearchDirection::Backward);
                None
            }
            Request::Close => {
                self.close_view();
                None
            }
            Request::Quit => {
                self.state.should_quit = true;
                None
            }
            _ => self.forward(request),
        };

        if let Some((_, state)) = self.views.current_mut() {
            state.adjust_viewport(visible_height);
        }
        if self.state.message.is_none() {
            self.show_selection();
        }
        pending
    }

    /// Keep the selection visible after the terminal changed size
    pub fn resize(&mut self, visible_height: usize) {
        if let Some((_, state)) = self.views.current_mut() {
            state.adjust_viewport(visible_height);
        }
    }

    /// Report how the editor call ended
    pub fn edit_finished(&mut self, edit: &PendingEdit, result: crate::error::Result<()>) {
        match result {
            Ok(()) => {
                tracing::info!("Edited {} ({})", edit.name, edit.id.short());
                self.show_selection();
            }
            Err(e) => {
                tracing::warn!("Editor failed for {}: {}", edit.name, e);
                self.state.set_message(format!("Editor failed: {}", e));
            }
        }
    }

    fn move_by(&mut self, delta: isize) -> Option<PendingEdit> {
        if let Some((view, state)) = self.views.current_mut() {
            state.move_by(delta, view.line_count());
        }
        None
    }

    fn move_to(&mut self, lineno: usize) -> Option<PendingEdit> {
        if let Some((view, state)) = self.views.current_mut() {
            state.move_to(lineno, view.line_count());
        }
        None
    }

    /// Pass a request to the current view and apply its outcome
    fn forward(&mut self, request: Request) -> Option<PendingEdit> {
        let (view, state) = self.views.current_mut()?;
        match view.request(request, state) {
            Ok(outcome) => self.apply(outcome),
            Err(e) => {
                tracing::warn!("{} failed: {}", request, e);
                self.state.set_message(e.to_string());
                None
            }
        }
    }

    fn apply(&mut self, outcome: RequestOutcome) -> Option<PendingEdit> {
        match outcome {
            RequestOutcome::None => None,
            RequestOutcome::Message(msg) => {
                self.state.set_message(msg);
                None
            }
            RequestOutcome::Reload => {
                self.reload();
                None
            }
            RequestOutcome::OpenBlob { id, name } => {
                self.open_blob(id, name);
                None
            }
            RequestOutcome::Edit { id, name, lineno } => Some(PendingEdit { id, name, lineno }),
            RequestOutcome::Close => {
                self.close_view();
                None
            }
        }
    }

    fn reload(&mut self) {
        if let Some((view, state)) = self.views.current_mut() {
            if let Err(e) = view.open(state) {
                tracing::warn!("Reloading {} view failed: {}", view.kind().name(), e);
                self.state.set_message(e.to_string());
            }
        }
    }

    fn open_blob(&mut self, id: ObjectId, name: String) {
        let view = BlobView::new(self.repo.clone(), id, name).with_highlighting(self.highlight);
        self.views.register(Box::new(view));
        if let Err(e) = self.views.display(ViewKind::Blob) {
            tracing::warn!("Opening blob failed: {}", e);
            self.state.set_message(e.to_string());
        }
    }

    fn close_view(&mut self) {
        if !self.views.close() {
            self.state.should_quit = true;
        }
    }

    fn submit_search(&mut self, query: &str, visible_height: usize) {
        self.state.clear_message();
        if query.is_empty() {
            self.show_selection();
            return;
        }
        match Regex::new(query) {
            Ok(regex) => {
                self.state.search = Some(regex);
                self.find(SearchDirection::Forward);
            }
            Err(e) => {
                self.state.set_message(format!("Invalid search pattern: {}", e));
            }
        }
        if let Some((_, state)) = self.views.current_mut() {
            state.adjust_viewport(visible_height);
        }
        if self.state.message.is_none() {
            self.show_selection();
        }
    }

    /// Select the next line matching the last search, wrapping around
    fn find(&mut self, direction: SearchDirection) {
        let Some(pattern) = self.state.search.clone() else {
            self.state.set_message("No previous search");
            return;
        };
        let Some((view, state)) = self.views.current_mut() else {
            return;
        };

        let count = view.line_count();
        let found = (1..=count)
            .map(|step| match direction {
                SearchDirection::Forward => (state.lineno + step) % count,
                SearchDirection::Backward => (state.lineno + count - step % count) % count,
            })
            .find(|&lineno| view.grep(lineno, &pattern));

        match found {
            Some(lineno) => state.move_to(lineno, count),
            None => self.state.set_message("No match found"),
        }
    }

    /// Show the current view's description of the selected line
    fn show_selection(&mut self) {
        let text = self
            .views
            .current()
            .and_then(|(view, state)| view.select(state));
        self.state.message = text;
    }
}
