//! In-memory backend: a cell grid plus a scripted input queue.
//!
//! Used by render and state-machine tests in place of a real terminal. It
//! records lifecycle calls (init/close/clear/flush/sync) so tests can assert
//! on redraw behavior, and returns `TerminalError::InputClosed` once the
//! scripted events run out.

use crate::{TerminalBackend, TerminalError, TerminalResult};
use core_events::{InputEvent, KeyCode, KeyEvent};
use core_text::Style;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryCell {
    pub ch: char,
    pub style: Style,
}

impl Default for MemoryCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::DEFAULT,
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    width: u16,
    height: u16,
    cells: Vec<MemoryCell>,
    events: VecDeque<InputEvent>,
    initialized: bool,
    fail_init: bool,
    clears: usize,
    flushes: usize,
    syncs: usize,
    closes: usize,
}

impl MemoryBackend {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![MemoryCell::default(); width as usize * height as usize],
            ..Self::default()
        }
    }

    /// Make the next `init` fail as if raw mode were unavailable.
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push_back(ev);
    }

    pub fn push_key(&mut self, key: KeyEvent) {
        self.push_event(InputEvent::Key(key));
    }

    /// Queue one plain key press per character.
    pub fn push_chars(&mut self, s: &str) {
        for c in s.chars() {
            self.push_key(KeyEvent::plain(KeyCode::Char(c)));
        }
    }

    /// Change the reported size (does not enqueue a resize event).
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![MemoryCell::default(); width as usize * height as usize];
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<MemoryCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width as usize + x as usize])
    }

    /// Row contents with trailing blanks trimmed.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        let row: String = self.cells[start..start + self.width as usize]
            .iter()
            .map(|c| c.ch)
            .collect();
        row.trim_end().to_string()
    }

    /// All rows, trailing blanks trimmed.
    pub fn screen(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row_text(y)).collect()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    pub fn sync_count(&self) -> usize {
        self.syncs
    }

    pub fn close_count(&self) -> usize {
        self.closes
    }
}

impl TerminalBackend for MemoryBackend {
    fn init(&mut self) -> TerminalResult<()> {
        if self.fail_init {
            return Err(TerminalError::Init(std::io::Error::other(
                "raw mode unavailable",
            )));
        }
        self.initialized = true;
        Ok(())
    }

    fn close(&mut self) -> TerminalResult<()> {
        if self.initialized {
            self.clear(Style::DEFAULT);
            self.initialized = false;
            self.closes += 1;
        }
        Ok(())
    }

    fn size(&self) -> TerminalResult<(u16, u16)> {
        Ok((self.width, self.height))
    }

    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.cells[idx] = MemoryCell { ch, style };
    }

    fn clear(&mut self, style: Style) {
        self.clears += 1;
        let blank = MemoryCell {
            ch: ' ',
            style: Style::new(style.fg, style.bg, Default::default()),
        };
        self.cells.fill(blank);
    }

    fn flush(&mut self) -> TerminalResult<()> {
        self.flushes += 1;
        Ok(())
    }

    fn sync(&mut self) -> TerminalResult<()> {
        self.syncs += 1;
        Ok(())
    }

    fn poll_event(&mut self) -> TerminalResult<InputEvent> {
        let ev = self.events.pop_front().ok_or(TerminalError::InputClosed)?;
        if let InputEvent::Resize(w, h) = ev {
            self.resize(w, h);
        }
        Ok(ev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_events_drain_then_close() {
        let mut b = MemoryBackend::new(4, 2);
        b.push_chars("ab");
        assert_eq!(b.pending_events(), 2);
        assert!(b.poll_event().is_ok());
        assert!(b.poll_event().is_ok());
        assert!(matches!(b.poll_event(), Err(TerminalError::InputClosed)));
    }

    #[test]
    fn resize_event_updates_size() {
        let mut b = MemoryBackend::new(4, 2);
        b.push_event(InputEvent::Resize(10, 5));
        b.poll_event().unwrap();
        assert_eq!(b.size().unwrap(), (10, 5));
        assert_eq!(b.screen().len(), 5);
    }

    #[test]
    fn row_text_trims_trailing_blanks() {
        let mut b = MemoryBackend::new(6, 1);
        b.set_cell(0, 0, 'h', Style::DEFAULT);
        b.set_cell(1, 0, 'i', Style::DEFAULT);
        b.set_cell(9, 0, '!', Style::DEFAULT);
        assert_eq!(b.row_text(0), "hi");
        assert_eq!(b.cell(1, 0).map(|c| c.ch), Some('i'));
        assert_eq!(b.cell(6, 0), None);
    }
}
