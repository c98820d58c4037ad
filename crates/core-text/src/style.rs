//! Cell styling carried from the escape decoder to the terminal backend.
//!
//! Styles are transient: the decoder recomputes them from scratch on every
//! redraw and resets them at the start of each logical line.

use bitflags::bitflags;

/// Fixed 8-color palette plus the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// Map a palette digit (`'0'..='7'`, `'9'` for default) to a color.
    pub fn from_digit(d: u8) -> Option<Color> {
        Some(match d {
            b'0' => Color::Black,
            b'1' => Color::Red,
            b'2' => Color::Green,
            b'3' => Color::Yellow,
            b'4' => Color::Blue,
            b'5' => Color::Magenta,
            b'6' => Color::Cyan,
            b'7' => Color::White,
            b'9' => Color::Default,
            _ => return None,
        })
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attrs: u8 {
        const BOLD      = 0b0000_0001;
        const UNDERLINE = 0b0000_0010;
        const REVERSE   = 0b0000_0100;
    }
}

impl Attrs {
    /// Single-digit attribute code. `None` means reset; unsupported codes map
    /// to an empty set so they are consumed without effect.
    pub fn from_code(code: u8) -> Option<Attrs> {
        match code {
            b'0' => None,
            b'1' => Some(Attrs::BOLD),
            b'3' | b'7' => Some(Attrs::REVERSE),
            b'4' => Some(Attrs::UNDERLINE),
            _ => Some(Attrs::empty()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attrs,
}

impl Style {
    pub const DEFAULT: Style = Style {
        fg: Color::Default,
        bg: Color::Default,
        attrs: Attrs::empty(),
    };

    /// Search hits: inverted video regardless of the ANSI-derived colors.
    pub const HIGHLIGHT: Style = Style {
        fg: Color::Default,
        bg: Color::Default,
        attrs: Attrs::REVERSE,
    };

    /// Status line colors.
    pub const STATUS: Style = Style {
        fg: Color::Blue,
        bg: Color::White,
        attrs: Attrs::empty(),
    };

    pub const fn new(fg: Color, bg: Color, attrs: Attrs) -> Self {
        Self { fg, bg, attrs }
    }

    pub fn reset(&mut self) {
        *self = Style::DEFAULT;
    }
}
