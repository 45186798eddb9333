//! Keybinding dispatcher for lazarus.
//!
//! Translates crossterm `KeyEvent`s into `AppState` mutations and returns a
//! [`KeyAction`] for the event loop. Starting a run needs the backend and the
//! event channel, so the dispatcher only signals it with `KeyAction::Activate`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{AppState, Mode};

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    /// Launch a run. The trigger is disabled while busy, so this is never
    /// returned while a run is active.
    Activate,
    Quit,
}

/// Dispatches `key` to the handler for the current mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::Normal => handle_normal(key, state),
    }
}

fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char('r') => {
            if state.view.busy {
                KeyAction::Continue
            } else {
                KeyAction::Activate
            }
        }
        KeyCode::Tab => {
            state.focus = state.focus.next();
            KeyAction::Continue
        }
        KeyCode::BackTab => {
            state.focus = state.focus.prev();
            KeyAction::Continue
        }
        KeyCode::Char('d') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.code_view = state.code_view.toggle();
            state.code_scroll = 0;
            KeyAction::Continue
        }
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            KeyAction::Continue
        }
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        _ => KeyAction::Continue,
    }
}

/// j / k / g / G and Ctrl-d / Ctrl-u. `None` when the key is not a scroll key.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_up(1),
        KeyCode::Char('g') | KeyCode::Home => state.scroll_top(),
        KeyCode::Char('G') | KeyCode::End => state.scroll_bottom(),
        KeyCode::Char('d') if ctrl => state.half_page_down(),
        KeyCode::Char('u') if ctrl => state.half_page_up(),
        KeyCode::PageDown => state.half_page_down(),
        KeyCode::PageUp => state.half_page_up(),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        _ => {}
    }
    KeyAction::Continue
}
