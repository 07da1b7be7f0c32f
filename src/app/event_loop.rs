//! Main event loop

use std::io::{stdout, Stdout};

use crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use super::config::Config;
use super::dispatch::{Dispatcher, PendingEdit};
use super::render::{render_frame, view_height};
use crate::editor::EditorSettings;
use crate::git::GitRepo;
use crate::handler::{handle_key_event, KeyBindingRegistry};
use crate::view::{TreeView, ViewKind, ViewRegistry};

/// Main event loop
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: Config,
) -> anyhow::Result<()> {
    let navigator = config.navigator()?;
    let repo = navigator.repo().clone();
    let editor = EditorSettings::resolve(
        &repo,
        config.editor_command.as_deref(),
        config.editor_line_number,
    );

    let mut views = ViewRegistry::new();
    views.register(Box::new(TreeView::new(navigator, config.columns.clone())));
    views.display(ViewKind::Tree)?;

    let mut dispatcher = Dispatcher::new(views, repo.clone()).with_highlighting(config.highlight);
    let keymap = KeyBindingRegistry::from_file();

    while !dispatcher.should_quit() {
        terminal.draw(|frame| render_frame(frame, &dispatcher))?;

        // Blocks until the next terminal event; nothing else updates the UI
        let key = match event::read()? {
            Event::Key(key) => key,
            Event::Resize(width, height) => {
                dispatcher.resize(view_height(Rect::new(0, 0, width, height)));
                continue;
            }
            _ => continue,
        };

        let size = terminal.size()?;
        let height = view_height(Rect::new(0, 0, size.width, size.height));
        let action = handle_key_event(dispatcher.state(), key, &keymap);

        if let Some(edit) = dispatcher.handle_action(action, height) {
            let result = with_suspended_terminal(terminal, || edit_blob(&repo, &editor, &edit))?;
            dispatcher.edit_finished(&edit, result);
        }
    }

    tracing::info!("Exiting");
    Ok(())
}

fn edit_blob(
    repo: &GitRepo,
    editor: &EditorSettings,
    edit: &PendingEdit,
) -> crate::error::Result<()> {
    repo.open_blob_editor(editor, &edit.id, &edit.name, edit.lineno)
}

/// Hand the terminal to a child process for the duration of `f`
fn with_suspended_terminal<T>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    f: impl FnOnce() -> T,
) -> anyhow::Result<T> {
    terminal::disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, cursor::Show)?;

    let result = f();

    terminal::enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
    terminal.clear()?;
    Ok(result)
}
