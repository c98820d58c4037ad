//! The blocking input loop: draw, poll one event, apply it, repeat.

use crate::{Outcome, dispatch, translate_key};
use anyhow::Result;
use core_events::InputEvent;
use core_render::Renderer;
use core_state::Pager;
use core_terminal::TerminalBackend;

/// Why `run_event_loop` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Quit,
    /// The navigator moved; load `pager.file()` with `set_content` and call
    /// `run_event_loop` again.
    AdvanceDocument,
}

/// Apply one input event to the pager.
pub fn handle_event(event: &InputEvent, pager: &mut Pager) -> Outcome {
    match event {
        InputEvent::Key(key) => match translate_key(pager.mode(), key) {
            Some(action) => dispatch(action, pager),
            None => Outcome::Continue,
        },
        InputEvent::Resize(w, h) => {
            tracing::debug!(target: "pager.input", width = w, height = h, "resize");
            pager.resize(*w, *h);
            Outcome::Continue
        }
        InputEvent::Other => Outcome::Continue,
    }
}

pub fn run_event_loop<B: TerminalBackend + ?Sized>(
    backend: &mut B,
    pager: &mut Pager,
    renderer: &mut Renderer,
) -> Result<LoopExit> {
    renderer.draw(backend, pager)?;
    loop {
        let event = backend.poll_event()?;
        match handle_event(&event, pager) {
            Outcome::Continue => renderer.draw(backend, pager)?,
            Outcome::AdvanceDocument => {
                tracing::info!(target: "pager.nav", index = pager.index(), "advance_document");
                backend.sync()?;
                return Ok(LoopExit::AdvanceDocument);
            }
            Outcome::Quit => {
                tracing::info!(target: "pager.input", "quit");
                return Ok(LoopExit::Quit);
            }
        }
    }
}
