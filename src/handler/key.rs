//! Keyboard event handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::KeyBindingRegistry;
use crate::core::{AppState, InputMode};
use crate::view::Request;

/// Actions that can result from key handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// No action needed
    None,
    /// Dispatch a request
    Request(Request),
    /// Append a character to the search prompt
    SearchInput(char),
    /// Delete the last character of the search prompt
    SearchBackspace,
    /// Compile and run the typed search
    SubmitSearch { query: String },
    /// Leave the search prompt
    CancelSearch,
}

/// Handle key event based on the current input mode
pub fn handle_key_event(state: &AppState, key: KeyEvent, keymap: &KeyBindingRegistry) -> KeyAction {
    // Ignore release/repeat events reported by some terminals
    if key.kind != KeyEventKind::Press {
        return KeyAction::None;
    }

    match &state.mode {
        InputMode::Browse => keymap
            .lookup(&key)
            .map(KeyAction::Request)
            .unwrap_or(KeyAction::None),
        InputMode::Search { query } => match key.code {
            KeyCode::Esc => KeyAction::CancelSearch,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                KeyAction::CancelSearch
            }
            KeyCode::Enter => KeyAction::SubmitSearch {
                query: query.clone(),
            },
            KeyCode::Backspace if query.is_empty() => KeyAction::CancelSearch,
            KeyCode::Backspace => KeyAction::SearchBackspace,
            KeyCode::Char(c) => KeyAction::SearchInput(c),
            _ => KeyAction::None,
        },
    }
}

/// Apply prompt edits to the input mode
pub fn update_input_buffer(state: &mut AppState, action: &KeyAction) {
    if let InputMode::Search { query } = &mut state.mode {
        match action {
            KeyAction::SearchInput(c) => query.push(*c),
            KeyAction::SearchBackspace => {
                query.pop();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_browse_mode_uses_keymap() {
        let state = AppState::new();
        let keymap = KeyBindingRegistry::new();
        assert_eq!(
            handle_key_event(&state, key_event(KeyCode::Char('j')), &keymap),
            KeyAction::Request(Request::MoveDown)
        );
        assert_eq!(
            handle_key_event(&state, key_event(KeyCode::Char('z')), &keymap),
            KeyAction::None
        );
    }

    #[test]
    fn test_search_mode_editing() {
        let mut state = AppState::new();
        state.mode = InputMode::Search {
            query: String::new(),
        };
        let keymap = KeyBindingRegistry::new();

        for c in ['m', 'a', 'x'] {
            let action = handle_key_event(&state, key_event(KeyCode::Char(c)), &keymap);
            update_input_buffer(&mut state, &action);
        }
        let action = handle_key_event(&state, key_event(KeyCode::Backspace), &keymap);
        update_input_buffer(&mut state, &action);

        assert_eq!(
            handle_key_event(&state, key_event(KeyCode::Enter), &keymap),
            KeyAction::SubmitSearch {
                query: "ma".to_string()
            }
        );
        // 'q' is typed into the prompt rather than closing the view
        assert_eq!(
            handle_key_event(&state, key_event(KeyCode::Char('q')), &keymap),
            KeyAction::SearchInput('q')
        );
    }

    #[test]
    fn test_search_mode_cancel() {
        let mut state = AppState::new();
        state.mode = InputMode::Search {
            query: String::new(),
        };
        let keymap = KeyBindingRegistry::new();
        assert_eq!(
            handle_key_event(&state, key_event(KeyCode::Esc), &keymap),
            KeyAction::CancelSearch
        );
        assert_eq!(
            handle_key_event(&state, key_event(KeyCode::Backspace), &keymap),
            KeyAction::CancelSearch
        );
    }
}
