//! Terminal backend abstraction with crossterm and in-memory implementations.
//!
//! The pager never talks to a terminal library directly; it receives a
//! `TerminalBackend` and only uses the cell-grid primitives below. This keeps
//! rendering and input handling testable against `MemoryBackend`.
//!
//! Lifecycle: `init` enters raw mode, `close` restores the terminal. Callers
//! should prefer `enter_guard`, whose guard closes the backend on drop so the
//! terminal is restored on every exit path, including unwinding panics.

use core_events::InputEvent;
use core_text::Style;
use std::ops::{Deref, DerefMut};
use thiserror::Error;

mod crossterm_backend;
mod input;
pub mod memory;

pub use crossterm_backend::CrosstermBackend;
pub use input::map_event;
pub use memory::MemoryBackend;

#[derive(Debug, Error)]
pub enum TerminalError {
    /// Raw mode (or the alternate screen) could not be acquired. Fatal.
    #[error("failed to initialize terminal: {0}")]
    Init(#[source] std::io::Error),
    #[error("terminal i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The event source has no more input (scripted backend exhausted, tty gone).
    #[error("terminal input closed")]
    InputClosed,
}

pub type TerminalResult<T> = Result<T, TerminalError>;

pub trait TerminalBackend {
    /// Enter raw mode. Idempotent.
    fn init(&mut self) -> TerminalResult<()>;
    /// Clear and restore the terminal to normal mode. Idempotent.
    fn close(&mut self) -> TerminalResult<()>;
    /// (width, height) in character cells.
    fn size(&self) -> TerminalResult<(u16, u16)>;
    /// Write one cell into the back buffer. Out-of-range coordinates are ignored.
    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style);
    /// Fill the back buffer with blanks using `style`'s colors.
    fn clear(&mut self, style: Style);
    /// Push back-buffer changes to the screen.
    fn flush(&mut self) -> TerminalResult<()>;
    /// Forget what is believed to be on screen and repaint everything.
    fn sync(&mut self) -> TerminalResult<()>;
    /// Block until the next input event.
    fn poll_event(&mut self) -> TerminalResult<InputEvent>;

    /// Enter and return a guard that will close the backend on drop.
    fn enter_guard(&mut self) -> TerminalResult<TerminalGuard<'_, Self>>
    where
        Self: Sized,
    {
        self.init()?;
        Ok(TerminalGuard {
            backend: self,
            active: true,
        })
    }
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a, B: TerminalBackend> {
    backend: &'a mut B,
    active: bool,
}

impl<B: TerminalBackend> TerminalGuard<'_, B> {
    /// Close now and surface any error instead of swallowing it on drop.
    pub fn release(mut self) -> TerminalResult<()> {
        self.active = false;
        self.backend.close()
    }
}

impl<B: TerminalBackend> Deref for TerminalGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.backend
    }
}

impl<B: TerminalBackend> DerefMut for TerminalGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.backend
    }
}

impl<B: TerminalBackend> Drop for TerminalGuard<'_, B> {
    fn drop(&mut self) {
        if self.active
            && let Err(err) = self.backend.close()
        {
            tracing::warn!(target: "runtime.terminal", %err, "terminal_restore_failed");
        }
    }
}
