//! Escape decoder: a table-driven tokenizer for the ANSI subset the pager
//! understands, plus a line-aware iterator that turns a buffer into styled
//! glyphs with screen columns.
//!
//! Tokenizer contract:
//! * Only ever invoked at an `ESC` byte. Rules are tried in table order and
//!   the first match wins; a token always consumes at least one byte so the
//!   scan makes progress on any input.
//! * Unknown `ESC[` sequences are skipped through their final byte; a bare
//!   `ESC` not followed by `[` consumes one byte.
//! * Clear directives (`ESC[?25l ... ESC[J`, `ESC[J`) carry the byte offset
//!   where drawing resumes. The decoder stops after yielding one; the caller
//!   decides how to restart.
//!
//! Column accounting: a glyph's column is its character index within the
//! logical line minus the invisible bytes (escapes, carriage returns, other
//! C0 controls) seen on that line. A tab expands to spaces up to the next
//! multiple of `TAB_WIDTH`. Horizontal scrolling is applied by the renderer,
//! not here.

use crate::style::{Attrs, Color, Style};
use std::borrow::Cow;

pub const ESC: u8 = 0x1b;
/// Tab stops every eight columns.
pub const TAB_WIDTH: usize = 8;

/// Which color slot a palette code targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Foreground,
    Background,
}

impl Layer {
    fn from_digit(d: u8) -> Option<Layer> {
        match d {
            b'3' => Some(Layer::Foreground),
            b'4' => Some(Layer::Background),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearKind {
    /// `ESC[?25l` followed by a screen clear: wipe and redraw from scratch.
    Full,
    /// `ESC[J`: resynchronize and redraw from the remainder.
    EraseDown,
}

const MAX_SGR_PARAMS: usize = 16;

/// Parameters of a generic `ESC[...m` sequence, stored inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SgrParams {
    values: [u16; MAX_SGR_PARAMS],
    len: usize,
}

impl SgrParams {
    pub fn as_slice(&self) -> &[u16] {
        &self.values[..self.len]
    }
}

/// Action requested by one escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Reset,
    Clear(ClearKind),
    /// Single-digit attribute code (`ESC[Am`).
    Attr(u8),
    Color(Layer, Color),
    /// `ESC[AA;Ncm`: color plus optional bold.
    AttrColor {
        bold: bool,
        layer: Layer,
        color: Color,
    },
    Sgr(SgrParams),
    Skip,
}

/// A matched escape sequence: bytes consumed plus the directive to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub len: usize,
    pub directive: Directive,
}

impl Token {
    const fn new(len: usize, directive: Directive) -> Self {
        Self { len, directive }
    }
}

/// One tokenizer rule. `matcher` receives the input starting at the `ESC`.
pub struct Rule {
    pub name: &'static str,
    matcher: fn(&[u8]) -> Option<Token>,
}

/// Ordered rule table; first match wins.
pub static RULES: &[Rule] = &[
    Rule {
        name: "reset",
        matcher: match_reset,
    },
    Rule {
        name: "hide_cursor_clear",
        matcher: match_hide_cursor_clear,
    },
    Rule {
        name: "erase_down",
        matcher: match_erase_down,
    },
    Rule {
        name: "attr",
        matcher: match_attr,
    },
    Rule {
        name: "color",
        matcher: match_color,
    },
    Rule {
        name: "attr_color",
        matcher: match_attr_color,
    },
    Rule {
        name: "sgr",
        matcher: match_sgr,
    },
    Rule {
        name: "csi_skip",
        matcher: match_csi_skip,
    },
];

fn match_reset(b: &[u8]) -> Option<Token> {
    b.starts_with(b"\x1b[m")
        .then_some(Token::new(3, Directive::Reset))
}

fn match_hide_cursor_clear(b: &[u8]) -> Option<Token> {
    const HIDE: &[u8] = b"\x1b[?25l";
    if !b.starts_with(HIDE) {
        return None;
    }
    let resume = find_screen_clear(&b[HIDE.len()..])? + HIDE.len();
    Some(Token::new(resume, Directive::Clear(ClearKind::Full)))
}

/// Offset just past the first `ESC[J` / `ESC[2J` in `b`.
fn find_screen_clear(b: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i < b.len() {
        if b[i] == ESC {
            let rest = &b[i..];
            if rest.starts_with(b"\x1b[J") {
                return Some(i + 3);
            }
            if rest.starts_with(b"\x1b[2J") {
                return Some(i + 4);
            }
        }
        i += 1;
    }
    None
}

fn match_erase_down(b: &[u8]) -> Option<Token> {
    b.starts_with(b"\x1b[J")
        .then_some(Token::new(3, Directive::Clear(ClearKind::EraseDown)))
}

fn match_attr(b: &[u8]) -> Option<Token> {
    match b {
        [ESC, b'[', a, b'm', ..] if a.is_ascii_digit() => Some(Token::new(4, Directive::Attr(*a))),
        _ => None,
    }
}

fn match_color(b: &[u8]) -> Option<Token> {
    match b {
        [ESC, b'[', n, c, b'm', ..] => {
            let layer = Layer::from_digit(*n)?;
            let color = Color::from_digit(*c)?;
            Some(Token::new(5, Directive::Color(layer, color)))
        }
        _ => None,
    }
}

fn match_attr_color(b: &[u8]) -> Option<Token> {
    match b {
        [ESC, b'[', a1, a2, b';', n, c, b'm', ..] if a1.is_ascii_digit() && a2.is_ascii_digit() => {
            let layer = Layer::from_digit(*n)?;
            let color = Color::from_digit(*c)?;
            Some(Token::new(
                8,
                Directive::AttrColor {
                    bold: (*a1, *a2) == (b'0', b'1'),
                    layer,
                    color,
                },
            ))
        }
        _ => None,
    }
}

fn match_sgr(b: &[u8]) -> Option<Token> {
    if !b.starts_with(b"\x1b[") {
        return None;
    }
    let mut params = SgrParams {
        values: [0; MAX_SGR_PARAMS],
        len: 0,
    };
    let mut current: Option<u16> = None;
    for (i, &byte) in b.iter().enumerate().skip(2) {
        match byte {
            b'0'..=b'9' => {
                let digit = u16::from(byte - b'0');
                current = Some(current.unwrap_or(0).saturating_mul(10).saturating_add(digit));
            }
            b';' | b'm' => {
                if params.len < MAX_SGR_PARAMS {
                    params.values[params.len] = current.unwrap_or(0);
                    params.len += 1;
                }
                current = None;
                if byte == b'm' {
                    return Some(Token::new(i + 1, Directive::Sgr(params)));
                }
            }
            _ => return None,
        }
    }
    None
}

/// Length of the complete CSI sequence at the start of `b`, final byte included.
fn csi_len(b: &[u8]) -> Option<usize> {
    if !b.starts_with(b"\x1b[") {
        return None;
    }
    // ECMA-48: parameter bytes 0x30-0x3F, intermediates 0x20-0x2F, final 0x40-0x7E.
    for (i, &byte) in b.iter().enumerate().skip(2) {
        match byte {
            0x20..=0x3f => continue,
            0x40..=0x7e => return Some(i + 1),
            _ => break,
        }
    }
    None
}

fn match_csi_skip(b: &[u8]) -> Option<Token> {
    if !b.starts_with(b"\x1b[") {
        return None;
    }
    let len = csi_len(b).unwrap_or(2);
    Some(Token::new(len, Directive::Skip))
}

/// Tokenize the escape sequence at the start of `input` (which must begin with `ESC`).
pub fn tokenize(input: &[u8]) -> Token {
    debug_assert_eq!(input.first(), Some(&ESC));
    match RULES
        .iter()
        .find_map(|rule| (rule.matcher)(input).map(|t| (rule.name, t)))
    {
        Some((rule, token)) => {
            tracing::trace!(target: "pager.decode", rule, len = token.len, "escape");
            token
        }
        None => Token::new(1, Directive::Skip),
    }
}

impl Style {
    /// Apply a style-affecting directive. Clear and skip directives are ignored.
    pub fn apply(&mut self, directive: &Directive) {
        match *directive {
            Directive::Reset => self.reset(),
            Directive::Attr(code) => match Attrs::from_code(code) {
                Some(a) => self.attrs |= a,
                None => self.reset(),
            },
            Directive::Color(layer, color) => self.set_color(layer, color),
            Directive::AttrColor { bold, layer, color } => {
                self.set_color(layer, color);
                if bold {
                    self.attrs |= Attrs::BOLD;
                }
            }
            Directive::Sgr(params) => {
                let mut codes = params.as_slice().iter().copied();
                while let Some(code) = codes.next() {
                    match code {
                        38 | 48 => self.apply_extended_color(code, &mut codes),
                        _ => self.apply_sgr_code(code),
                    }
                }
            }
            Directive::Clear(_) | Directive::Skip => {}
        }
    }

    fn set_color(&mut self, layer: Layer, color: Color) {
        match layer {
            Layer::Foreground => self.fg = color,
            Layer::Background => self.bg = color,
        }
    }

    /// `38;5;n` / `48;5;n` (256 colors) and `38;2;r;g;b` / `48;2;r;g;b`
    /// (truecolor). Sub-parameters are always consumed; only the first 16
    /// indexed colors map onto the palette, folded to their base 8.
    fn apply_extended_color(&mut self, code: u16, rest: &mut impl Iterator<Item = u16>) {
        let layer = if code == 38 {
            Layer::Foreground
        } else {
            Layer::Background
        };
        match rest.next() {
            Some(5) => {
                if let Some(n) = rest.next().filter(|n| *n < 16)
                    && let Some(color) = Color::from_digit(b'0' + (n % 8) as u8)
                {
                    self.set_color(layer, color);
                }
            }
            Some(2) => {
                rest.take(3).for_each(drop);
            }
            _ => {}
        }
    }

    fn apply_sgr_code(&mut self, code: u16) {
        let palette = |offset: u16| Color::from_digit(b'0' + offset as u8);
        match code {
            0 => self.reset(),
            1 => self.attrs |= Attrs::BOLD,
            3 | 7 => self.attrs |= Attrs::REVERSE,
            4 => self.attrs |= Attrs::UNDERLINE,
            22 => self.attrs.remove(Attrs::BOLD),
            24 => self.attrs.remove(Attrs::UNDERLINE),
            27 => self.attrs.remove(Attrs::REVERSE),
            30..=37 | 39 => {
                if let Some(c) = palette(code - 30) {
                    self.fg = c;
                }
            }
            40..=47 | 49 => {
                if let Some(c) = palette(code - 40) {
                    self.bg = c;
                }
            }
            _ => {}
        }
    }
}

/// A visible character with its resolved style and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
    /// Logical line index (0-based) within the decoded buffer.
    pub line: usize,
    /// Visible column within the line, before horizontal scrolling.
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Glyph(Glyph),
    /// End of logical line `line`.
    Newline { line: usize },
    /// Screen-clear directive; drawing restarts from `src[resume_at..]`.
    Clear { kind: ClearKind, resume_at: usize },
}

/// Streaming decoder over a buffer. Yields glyphs, line ends, and at most one
/// clear directive (after which it is exhausted).
pub struct Decoder<'a> {
    src: &'a str,
    pos: usize,
    style: Style,
    line: usize,
    column: usize,
    invisible: usize,
    /// Columns still owed to a tab that is being expanded.
    tab_fill: usize,
    done: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            style: Style::DEFAULT,
            line: 0,
            column: 0,
            invisible: 0,
            tab_fill: 0,
            done: false,
        }
    }

    /// Invisible bytes consumed so far on the current line.
    pub fn invisible_on_line(&self) -> usize {
        self.invisible
    }

    /// Style that would apply to the next visible character.
    pub fn current_style(&self) -> Style {
        self.style
    }

    fn emit(&mut self, ch: char) -> Decoded {
        let glyph = Glyph {
            ch,
            style: self.style,
            line: self.line,
            column: self.column,
        };
        self.column += 1;
        Decoded::Glyph(glyph)
    }
}

impl Iterator for Decoder<'_> {
    type Item = Decoded;

    fn next(&mut self) -> Option<Decoded> {
        if self.done {
            return None;
        }
        if self.tab_fill > 0 {
            self.tab_fill -= 1;
            return Some(self.emit(' '));
        }
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                ESC => {
                    let token = tokenize(&bytes[self.pos..]);
                    let start = self.pos;
                    self.pos += token.len;
                    self.invisible += token.len;
                    if let Directive::Clear(kind) = token.directive {
                        self.done = true;
                        return Some(Decoded::Clear {
                            kind,
                            resume_at: start + token.len,
                        });
                    }
                    self.style.apply(&token.directive);
                }
                b'\n' => {
                    self.pos += 1;
                    let line = self.line;
                    self.line += 1;
                    self.column = 0;
                    self.invisible = 0;
                    self.style = Style::DEFAULT;
                    return Some(Decoded::Newline { line });
                }
                b'\t' => {
                    self.pos += 1;
                    self.tab_fill = TAB_WIDTH - 1 - self.column % TAB_WIDTH;
                    return Some(self.emit(' '));
                }
                // Remaining C0 controls and DEL never reach the screen.
                0x00..=0x1f | 0x7f => {
                    self.pos += 1;
                    self.invisible += 1;
                }
                _ => {
                    let ch = self.src[self.pos..].chars().next()?;
                    self.pos += ch.len_utf8();
                    return Some(self.emit(ch));
                }
            }
        }
        self.done = true;
        None
    }
}

/// De-colorized projection: the text with every CSI escape sequence removed.
/// Plain text is returned borrowed and unchanged; newlines are never removed
/// so line indices agree with the original buffer.
pub fn strip_escapes(text: &str) -> Cow<'_, str> {
    if !text.as_bytes().contains(&ESC) {
        return Cow::Borrowed(text);
    }
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut kept = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == ESC
            && let Some(len) = csi_len(&bytes[i..])
        {
            // ESC and CSI bytes are ASCII, so both cut points are char boundaries.
            out.push_str(&text[kept..i]);
            i += len;
            kept = i;
        } else {
            i += 1;
        }
    }
    out.push_str(&text[kept..]);
    Cow::Owned(out)
}
