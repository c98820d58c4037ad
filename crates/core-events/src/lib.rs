//! Core input event types for the pager.
//!
//! The terminal backend translates whatever its platform library reports into
//! these normalized values; the input state machine never sees raw terminal
//! bytes or library specific key codes.

use std::fmt;

/// Normalized input events produced by `TerminalBackend::poll_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
    /// Any other event the backend surfaced (focus, mouse, paste). Consumers
    /// redraw and otherwise ignore it.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified key.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// `Ctrl` + character chord.
    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }

    /// Returns the character when this is an unmodified (or shift-only) printable key.
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !self.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT)
                    && !c.is_control() =>
            {
                Some(c)
            }
            _ => None,
        }
    }

    /// True for `Ctrl` + `c` (case-insensitive).
    pub fn is_ctrl(&self, c: char) -> bool {
        self.mods.contains(KeyModifiers::CTRL)
            && matches!(self.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
    }
}

/// KeyCode enumerates normalized logical key representations consumed by higher layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(key: KeyEvent) -> Self {
        InputEvent::Key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_display() {
        let k = KeyEvent::ctrl('x');
        let s = format!("{}", k);
        assert!(s.contains("Char"));
        assert!(s.contains("CTRL"));
    }

    #[test]
    fn printable_rejects_control_chords() {
        assert_eq!(KeyEvent::plain(KeyCode::Char('n')).printable(), Some('n'));
        assert_eq!(
            KeyEvent::new(KeyCode::Char('N'), KeyModifiers::SHIFT).printable(),
            Some('N')
        );
        assert_eq!(KeyEvent::ctrl('d').printable(), None);
        assert_eq!(KeyEvent::plain(KeyCode::Enter).printable(), None);
    }

    #[test]
    fn ctrl_match_ignores_case() {
        let k = KeyEvent::new(KeyCode::Char('L'), KeyModifiers::CTRL | KeyModifiers::SHIFT);
        assert!(k.is_ctrl('l'));
        assert!(!KeyEvent::plain(KeyCode::Char('l')).is_ctrl('l'));
    }
}
