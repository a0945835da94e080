//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] actions.  Adding a new keybinding is
//! a single match arm in [`handle_browse_key`] or [`handle_editing_key`].
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] for the action (if one doesn't exist).
//! 2. Add a `KeyCode` match arm for the right [`Mode`].
//! 3. Update the help text in [`crate::ui`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Mode};
use crate::session::FetchRequest;
use crate::source::SortField;

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.  Returns the fetch the key
/// asked for, if any; the caller is responsible for running it.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<FetchRequest> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match app.mode {
        Mode::Browse => handle_browse_key(app, key),
        Mode::Editing => handle_editing_key(app, key),
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) -> Option<FetchRequest> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('/') | KeyCode::Char('i') => app.start_editing(),
        KeyCode::Char('d') | KeyCode::Delete => app.dismiss_selected(),
        KeyCode::Char('a') => app.sort_by(SortField::Author),
        KeyCode::Char('t') => app.sort_by(SortField::Title),
        KeyCode::Char('c') => app.sort_by(SortField::Comments),
        KeyCode::Char('p') => app.sort_by(SortField::Points),
        KeyCode::Char('r') => return Some(app.retry()),
        _ => {}
    }
    None
}

fn handle_editing_key(app: &mut App, key: KeyEvent) -> Option<FetchRequest> {
    match key.code {
        KeyCode::Enter => return app.submit(),
        KeyCode::Esc => app.stop_editing(),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.clear_term(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.push_char(c),
        _ => {}
    }
    None
}
