//! crossterm-backed terminal: raw mode + alternate screen, double-buffered cells.
//!
//! `set_cell`/`clear` only touch the back buffer. `flush` emits the cells that
//! differ from the front buffer (what the terminal is believed to show) and
//! batches runs of adjacent cells into a single `Print`. `sync` drops the
//! front buffer so the next flush repaints every cell.

use crate::{TerminalBackend, TerminalError, TerminalResult, map_event};
use core_events::InputEvent;
use core_text::{Attrs, Color, Style};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event, execute, queue,
    style::{
        Attribute, Color as CColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::{Write, stdout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    style: Style,
}

const BLANK: Cell = Cell {
    ch: ' ',
    style: Style::DEFAULT,
};

pub struct CrosstermBackend {
    entered: bool,
    width: u16,
    height: u16,
    back: Vec<Cell>,
    /// `None` after `sync` or a resize: next flush repaints everything.
    front: Option<Vec<Cell>>,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self {
            entered: false,
            width: 0,
            height: 0,
            back: Vec::new(),
            front: None,
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        tracing::debug!(target: "runtime.terminal", width, height, "resize_buffers");
        self.width = width;
        self.height = height;
        self.back = vec![BLANK; width as usize * height as usize];
        self.front = None;
    }

    fn refresh_size(&mut self) {
        if let Ok((w, h)) = terminal::size() {
            self.resize(w, h);
        }
    }
}

fn map_color(c: Color) -> CColor {
    match c {
        Color::Default => CColor::Reset,
        Color::Black => CColor::Black,
        Color::Red => CColor::DarkRed,
        Color::Green => CColor::DarkGreen,
        Color::Yellow => CColor::DarkYellow,
        Color::Blue => CColor::DarkBlue,
        Color::Magenta => CColor::DarkMagenta,
        Color::Cyan => CColor::DarkCyan,
        Color::White => CColor::Grey,
    }
}

fn queue_style<W: Write>(out: &mut W, style: Style) -> std::io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset))?;
    if style.attrs.contains(Attrs::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.attrs.contains(Attrs::UNDERLINE) {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if style.attrs.contains(Attrs::REVERSE) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    queue!(
        out,
        SetForegroundColor(map_color(style.fg)),
        SetBackgroundColor(map_color(style.bg))
    )
}

impl TerminalBackend for CrosstermBackend {
    fn init(&mut self) -> TerminalResult<()> {
        if !self.entered {
            enable_raw_mode().map_err(TerminalError::Init)?;
            execute!(stdout(), EnterAlternateScreen, Hide).map_err(TerminalError::Init)?;
            self.entered = true;
            self.refresh_size();
            tracing::info!(target: "runtime.terminal", width = self.width, height = self.height, "terminal_entered");
        }
        Ok(())
    }

    fn close(&mut self) -> TerminalResult<()> {
        if self.entered {
            execute!(
                stdout(),
                SetAttribute(Attribute::Reset),
                Clear(ClearType::All),
                LeaveAlternateScreen,
                Show
            )?;
            disable_raw_mode()?;
            self.entered = false;
            tracing::info!(target: "runtime.terminal", "terminal_restored");
        }
        Ok(())
    }

    fn size(&self) -> TerminalResult<(u16, u16)> {
        if self.width > 0 && self.height > 0 {
            return Ok((self.width, self.height));
        }
        Ok(terminal::size()?)
    }

    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        // A raw control char would move the real cursor and desync the front buffer.
        let ch = if ch.is_control() { ' ' } else { ch };
        self.back[idx] = Cell { ch, style };
    }

    fn clear(&mut self, style: Style) {
        self.refresh_size();
        let blank = Cell {
            ch: ' ',
            style: Style::new(style.fg, style.bg, Attrs::empty()),
        };
        self.back.fill(blank);
    }

    fn flush(&mut self) -> TerminalResult<()> {
        let mut out = stdout().lock();
        let width = self.width as usize;
        let mut last_style: Option<Style> = None;
        let mut run = String::new();
        for y in 0..self.height as usize {
            let mut x = 0usize;
            while x < width {
                let idx = y * width + x;
                let cell = self.back[idx];
                if self.front.as_ref().is_some_and(|f| f[idx] == cell) {
                    x += 1;
                    continue;
                }
                // Start a run of changed cells sharing one style.
                queue!(out, MoveTo(x as u16, y as u16))?;
                if last_style != Some(cell.style) {
                    queue_style(&mut out, cell.style)?;
                    last_style = Some(cell.style);
                }
                run.clear();
                while x < width {
                    let idx = y * width + x;
                    let next = self.back[idx];
                    let unchanged = self.front.as_ref().is_some_and(|f| f[idx] == next);
                    if unchanged || next.style != cell.style {
                        break;
                    }
                    run.push(next.ch);
                    x += 1;
                }
                queue!(out, Print(&run))?;
            }
        }
        queue!(out, SetAttribute(Attribute::Reset))?;
        out.flush()?;
        self.front = Some(self.back.clone());
        Ok(())
    }

    fn sync(&mut self) -> TerminalResult<()> {
        self.refresh_size();
        execute!(stdout(), Clear(ClearType::All))?;
        self.front = None;
        Ok(())
    }

    fn poll_event(&mut self) -> TerminalResult<InputEvent> {
        loop {
            let raw = event::read()?;
            if let Some(ev) = map_event(&raw) {
                if let InputEvent::Resize(w, h) = ev {
                    self.resize(w, h);
                }
                return Ok(ev);
            }
        }
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_cell_outside_grid_is_ignored() {
        let mut b = CrosstermBackend::new();
        b.resize(4, 2);
        b.set_cell(10, 0, 'x', Style::DEFAULT);
        b.set_cell(1, 1, 'y', Style::DEFAULT);
        assert_eq!(b.back[5].ch, 'y');
        assert!(b.back.iter().filter(|c| c.ch != ' ').count() == 1);
    }

    #[test]
    fn control_chars_are_stored_as_blanks() {
        let mut b = CrosstermBackend::new();
        b.resize(3, 1);
        b.set_cell(0, 0, '\t', Style::DEFAULT);
        b.set_cell(1, 0, '\u{8}', Style::DEFAULT);
        assert!(b.back.iter().all(|c| c.ch == ' '));
    }

    #[test]
    fn resize_invalidates_front_buffer() {
        let mut b = CrosstermBackend::new();
        b.resize(2, 2);
        b.front = Some(b.back.clone());
        b.resize(3, 2);
        assert!(b.front.is_none());
        assert_eq!(b.back.len(), 6);
    }

    #[test]
    fn palette_maps_to_dark_variants() {
        assert_eq!(map_color(Color::Default), CColor::Reset);
        assert_eq!(map_color(Color::Blue), CColor::DarkBlue);
        assert_eq!(map_color(Color::White), CColor::Grey);
    }
}
