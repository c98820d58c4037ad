//! Key -> Action translation, one table per mode.
//!
//! * View: scrolling, paging, jumps, document switching, `/` and quit.
//! * QueryEntry: printable keys build the query; Backspace/Ctrl-H/Ctrl-D
//!   delete, Enter commits, Esc cancels.
//! * SearchNavigate: `n`/`N` cycle, `q`/Esc/Ctrl-C cancel, Enter is consumed,
//!   everything else falls through to the View table so scrolling keeps
//!   working while a query is pinned.

use crate::{Action, ScrollKind};
use core_events::{KeyCode, KeyEvent};
use core_state::Mode;

pub fn translate_key(mode: Mode, key: &KeyEvent) -> Option<Action> {
    let action = match mode {
        Mode::View => view_key(key),
        Mode::QueryEntry => query_key(key),
        Mode::SearchNavigate => search_key(key),
    };
    tracing::trace!(target: "pager.input", ?mode, mapped = action.is_some(), "translate_key");
    action
}

fn view_key(key: &KeyEvent) -> Option<Action> {
    use ScrollKind::*;
    // Ctrl chords first so Ctrl-N / Ctrl-L never read as plain `n` / `l`.
    if key.is_ctrl('c') {
        return Some(Action::Quit);
    }
    if key.is_ctrl('n') {
        return Some(Action::Scroll(LineDown));
    }
    if key.is_ctrl('p') {
        return Some(Action::Scroll(LineUp));
    }
    if key.is_ctrl('d') {
        return Some(Action::Scroll(PageDown));
    }
    if key.is_ctrl('u') {
        return Some(Action::Scroll(PageUp));
    }
    if key.is_ctrl('l') {
        return Some(Action::NextDocument);
    }
    if key.is_ctrl('h') {
        return Some(Action::PreviousDocument);
    }
    let action = match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Down | KeyCode::Enter => Action::Scroll(LineDown),
        KeyCode::Up => Action::Scroll(LineUp),
        KeyCode::Right => Action::Scroll(ColumnRight),
        KeyCode::Left => Action::Scroll(ColumnLeft),
        KeyCode::PageDown => Action::Scroll(PageDown),
        KeyCode::PageUp => Action::Scroll(PageUp),
        KeyCode::Home => Action::Scroll(Top),
        KeyCode::End => Action::Scroll(Bottom),
        _ => match key.printable()? {
            'j' => Action::Scroll(LineDown),
            'k' => Action::Scroll(LineUp),
            'l' => Action::Scroll(ColumnRight),
            'h' => Action::Scroll(ColumnLeft),
            ' ' => Action::Scroll(PageDown),
            '<' => Action::Scroll(Top),
            '>' => Action::Scroll(Bottom),
            '/' => Action::BeginQuery,
            'q' => Action::Quit,
            _ => return None,
        },
    };
    Some(action)
}

fn query_key(key: &KeyEvent) -> Option<Action> {
    // Ctrl-H is what BS-sending terminals report for Backspace.
    if key.is_ctrl('d') || key.is_ctrl('h') {
        return Some(Action::QueryBackspace);
    }
    if key.is_ctrl('c') {
        return Some(Action::CancelSearch);
    }
    match key.code {
        KeyCode::Enter => Some(Action::CommitQuery),
        KeyCode::Esc => Some(Action::CancelSearch),
        KeyCode::Backspace | KeyCode::Delete => Some(Action::QueryBackspace),
        _ => key.printable().map(Action::QueryChar),
    }
}

fn search_key(key: &KeyEvent) -> Option<Action> {
    if key.is_ctrl('c') {
        return Some(Action::CancelSearch);
    }
    match key.code {
        KeyCode::Enter => return Some(Action::Ignore),
        KeyCode::Esc => return Some(Action::CancelSearch),
        _ => {}
    }
    match key.printable() {
        Some('n') => Some(Action::SearchForward),
        Some('N') => Some(Action::SearchBackward),
        Some('q') => Some(Action::CancelSearch),
        _ => view_key(key),
    }
}
