//! Input handling for the pager: key translation per mode, action dispatch,
//! and the blocking event loop that ties them to a terminal backend.
//!
//! Flow for one event:
//! 1. `translate_key(mode, key)` maps the key to an `Action` (or nothing).
//! 2. `dispatch(action, pager)` mutates the `Pager` and yields an `Outcome`.
//! 3. `run_event_loop` redraws and either keeps polling or returns a
//!    `LoopExit` to the driver.

pub mod dispatcher;
mod event_loop;
mod key_translator;

pub use dispatcher::dispatch;
pub use event_loop::{LoopExit, handle_event, run_event_loop};
pub use key_translator::translate_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollKind {
    LineDown,
    LineUp,
    ColumnRight,
    ColumnLeft,
    PageDown,
    PageUp,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Scroll(ScrollKind),
    /// `/`: start typing a query.
    BeginQuery,
    QueryChar(char),
    QueryBackspace,
    /// Enter while typing: pin the query and jump to the first match.
    CommitQuery,
    CancelSearch,
    SearchForward,
    SearchBackward,
    NextDocument,
    PreviousDocument,
    Quit,
    /// Key consumed without effect.
    Ignore,
}

/// Result of processing one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// The navigator selected another document; the driver must load it.
    AdvanceDocument,
    Quit,
}
