//! Frame assembly for the pager.
//!
//! One `draw` paints a whole screen from the `Pager`:
//! 1. Body pass: the document is decoded glyph by glyph; lines above the
//!    vertical offset are skipped, columns left of the horizontal offset are
//!    dropped, and each visible line lands one row below the status line.
//!    Query hits on a line are painted with `Style::HIGHLIGHT` over whatever
//!    color the escapes selected.
//! 2. Status pass: plain text on row 0 in `Style::STATUS`, padded to the full
//!    width, no escape interpretation.
//!
//! Clear directives: when the decoder reports a screen clear the remainder
//! after it becomes the new document and the body is drawn again from
//! scratch. A full clear blanks and flushes the screen first, an erase-down
//! only resynchronizes. Each restart strictly shortens the document, so the
//! loop terminates.

use core_state::{Pager, RenderView};
use core_terminal::{TerminalBackend, TerminalResult};
use core_text::ansi::ESC;
use core_text::{ClearKind, Decoded, Decoder, Glyph, Style};
use std::time::Instant;

pub mod status;

use status::{StatusContext, build_status};

/// Clear directive met while drawing the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Restart {
    kind: ClearKind,
    resume_at: usize,
}

#[derive(Debug, Default)]
pub struct Renderer {
    frames: u64,
    restarts: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed frames since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Body redraws triggered by clear directives.
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// Paint the body and status line, then flush.
    pub fn draw<B: TerminalBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        pager: &mut Pager,
    ) -> TerminalResult<()> {
        let started = Instant::now();
        let (w, h) = backend.size()?;
        if pager.size() != (usize::from(w), usize::from(h)) {
            pager.resize(w, h);
        }
        loop {
            backend.clear(Style::DEFAULT);
            let Some(restart) = draw_body(backend, pager.render_view()) else {
                break;
            };
            self.restarts += 1;
            tracing::debug!(
                target: "pager.render",
                kind = ?restart.kind,
                resume_at = restart.resume_at,
                "clear_directive_restart"
            );
            pager.restart_from(restart.resume_at);
            match restart.kind {
                ClearKind::Full => {
                    backend.clear(Style::DEFAULT);
                    backend.flush()?;
                    backend.sync()?;
                }
                ClearKind::EraseDown => backend.sync()?,
            }
        }
        draw_status(backend, pager);
        backend.flush()?;
        self.frames += 1;
        let ns = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);
        tracing::trace!(
            target: "pager.render",
            frame = self.frames,
            first_line = pager.viewport().first_line(),
            first_col = pager.viewport().first_col(),
            ns,
            "frame"
        );
        Ok(())
    }
}

/// Skippable pass: scrolled, clipped, rows offset below the status line.
fn draw_body<B: TerminalBackend + ?Sized>(
    backend: &mut B,
    mut view: RenderView<'_>,
) -> Option<Restart> {
    let doc = view.doc;
    let text = doc.text();
    let first = view.viewport.first_line();
    let end = first.saturating_add(view.body_rows);
    // Without escapes no clear can follow the visible region.
    let scan_all = text.as_bytes().contains(&ESC);
    let mut line: Vec<Glyph> = Vec::new();
    for item in Decoder::new(text) {
        match item {
            Decoded::Glyph(g) => {
                if (first..end).contains(&g.line) {
                    line.push(g);
                } else if g.line >= end && !scan_all {
                    break;
                }
            }
            Decoded::Newline { line: n } => {
                if (first..end).contains(&n) {
                    paint_line(backend, &mut view, n - first, &line);
                }
                line.clear();
            }
            Decoded::Clear { kind, resume_at } => return Some(Restart { kind, resume_at }),
        }
    }
    // Unterminated tail.
    if let Some(g) = line.first() {
        let row = g.line - first;
        paint_line(backend, &mut view, row, &line);
    }
    None
}

fn paint_line<B: TerminalBackend + ?Sized>(
    backend: &mut B,
    view: &mut RenderView<'_>,
    body_row: usize,
    glyphs: &[Glyph],
) {
    let first_col = view.viewport.first_col();
    let width = view.width;
    let hits = if view.highlighter.is_active() {
        let visible: String = glyphs.iter().map(|g| g.ch).collect();
        view.highlighter.ranges(&visible)
    } else {
        Vec::new()
    };
    let Ok(y) = u16::try_from(body_row + 1) else {
        return;
    };
    for g in glyphs.iter().skip_while(|g| g.column < first_col) {
        let x = g.column - first_col;
        if x >= width {
            break;
        }
        let style = if hits.iter().any(|r| r.contains(&g.column)) {
            Style::HIGHLIGHT
        } else {
            g.style
        };
        // x < width <= u16::MAX
        backend.set_cell(x as u16, y, g.ch, style);
    }
}

/// Non-skippable pass: status text on row 0, padded to the full width.
fn draw_status<B: TerminalBackend + ?Sized>(backend: &mut B, pager: &Pager) {
    let ctx = StatusContext {
        mode: pager.mode(),
        file: pager.file(),
        query: pager.query(),
        first_line: pager.viewport().first_line(),
        document_count: pager.document_count(),
        show_usage: pager.show_usage(),
    };
    let text = build_status(&ctx);
    let (width, _) = pager.size();
    let mut chars = text.chars();
    for x in 0..width {
        let ch = chars.next().unwrap_or(' ');
        backend.set_cell(x as u16, 0, ch, Style::STATUS);
    }
}
