//! Document buffer and ANSI text handling for the pager.
//!
//! `Document` owns the full text of the displayed content (escape sequences
//! included) and keeps a derived logical line count in sync on every
//! mutation. A monotonically increasing `revision` lets downstream caches
//! (search projections, match lists) detect staleness without diffing.

pub mod ansi;
pub mod style;

pub use ansi::{ClearKind, Decoded, Decoder, Glyph, strip_escapes};
pub use style::{Attrs, Color, Style};

/// Count logical lines: every `\n` terminates a line and a non-empty
/// unterminated tail forms one more. `""` has zero lines.
pub fn count_lines(text: &str) -> usize {
    let terminators = text.bytes().filter(|&b| b == b'\n').count();
    if text.is_empty() || text.ends_with('\n') {
        terminators
    } else {
        terminators + 1
    }
}

/// Number of `\n` bytes strictly before `byte` (the 0-based line containing it).
pub fn line_of_byte(text: &str, byte: usize) -> usize {
    let end = byte.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count()
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    text: String,
    line_count: usize,
    revision: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        let mut doc = Self::new();
        doc.set_content(text);
        doc
    }

    /// Replace the whole buffer.
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.line_count = count_lines(&self.text);
        self.revision += 1;
    }

    /// Append to the buffer (streaming updates).
    pub fn add_content(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.text.push_str(text);
        self.line_count = count_lines(&self.text);
        self.revision += 1;
    }

    /// Drop everything before `byte`, keeping the remainder as the new content.
    /// Used when a clear-screen directive restarts the draw. `byte` must lie on
    /// a char boundary; out-of-range values empty the buffer.
    pub fn retain_from(&mut self, byte: usize) {
        let rest = self.text.get(byte..).unwrap_or_default().to_string();
        self.set_content(rest);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }
}
