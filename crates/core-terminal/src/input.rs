//! Translation of crossterm events into normalized `InputEvent`s.

use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{
    Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CMods,
};

/// Map a crossterm event. Returns `None` for events the pager should not see
/// at all (key releases, unsupported keys).
pub fn map_event(event: &CEvent) -> Option<InputEvent> {
    match event {
        CEvent::Key(key) => map_key_event(key).map(InputEvent::Key),
        CEvent::Resize(w, h) => Some(InputEvent::Resize(*w, *h)),
        _ => Some(InputEvent::Other),
    }
}

fn map_key_event(event: &CKeyEvent) -> Option<KeyEvent> {
    if matches!(event.kind, CKeyEventKind::Release) {
        return None;
    }
    let code = map_key_code(&event.code)?;
    Some(KeyEvent::new(code, map_mods(event.modifiers)))
}

fn map_key_code(code: &CKeyCode) -> Option<KeyCode> {
    let out = match code {
        CKeyCode::Char(c) => KeyCode::Char(*c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Tab | CKeyCode::BackTab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        _ => return None,
    };
    Some(out)
}

fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: CKeyCode, mods: CMods) -> CEvent {
        CEvent::Key(CKeyEvent {
            code,
            modifiers: mods,
            kind: CKeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn maps_ctrl_chord() {
        let ev = map_event(&press(CKeyCode::Char('l'), CMods::CONTROL));
        assert_eq!(ev, Some(InputEvent::Key(KeyEvent::ctrl('l'))));
    }

    #[test]
    fn drops_key_release() {
        let ev = CEvent::Key(CKeyEvent {
            code: CKeyCode::Char('q'),
            modifiers: CMods::NONE,
            kind: CKeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event(&ev), None);
    }

    #[test]
    fn resize_and_other_events() {
        assert_eq!(
            map_event(&CEvent::Resize(80, 24)),
            Some(InputEvent::Resize(80, 24))
        );
        assert_eq!(map_event(&CEvent::FocusGained), Some(InputEvent::Other));
    }

    #[test]
    fn unsupported_keys_are_dropped() {
        assert_eq!(map_event(&press(CKeyCode::F(5), CMods::NONE)), None);
    }
}
