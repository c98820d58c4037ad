//! Pager state: the single aggregate the input loop mutates and the renderer
//! reads.
//!
//! `Pager` owns the current `Document`, the `Viewport` over it, the document
//! list, and the search engine plus its cursor. Interaction mode is one
//! `Mode` value; the old pair of "slash typed" / "search pinned" flags could
//! express a combination that has no meaning, the enum cannot.
//!
//! Vertical clamping uses the body height (terminal rows minus the status
//! row) so the last line of a document is always reachable.

use core_config::Config;
use core_model::{Bounds, DocumentList, NavOutcome, Viewport};
use core_search::{SearchEngine, SearchState};
use core_text::Document;
use std::ops::Range;

/// Rows reserved above the body for the status line.
pub const STATUS_ROWS: usize = 1;

/// Current interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Scrolling and document switching.
    #[default]
    View,
    /// Typing a search query after `/`.
    QueryEntry,
    /// A committed query is pinned; `n`/`N` cycle through matches.
    SearchNavigate,
}

/// Query hit spans for rendered lines.
pub struct Highlighter<'a> {
    engine: &'a mut SearchEngine,
    query: &'a str,
}

impl Highlighter<'_> {
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Character ranges of the active query inside one line of visible text.
    pub fn ranges(&mut self, visible: &str) -> Vec<Range<usize>> {
        self.engine.highlight_ranges(visible, self.query)
    }
}

pub struct RenderView<'a> {
    pub doc: &'a Document,
    pub viewport: &'a Viewport,
    pub body_rows: usize,
    pub width: usize,
    pub highlighter: Highlighter<'a>,
}

#[derive(Debug)]
pub struct Pager {
    doc: Document,
    viewport: Viewport,
    documents: DocumentList,
    search: SearchEngine,
    cursor: SearchState,
    mode: Mode,
    page_size: usize,
    show_usage: bool,
    width: usize,
    height: usize,
}

impl Pager {
    pub fn new(files: Vec<String>) -> Self {
        Self::with_config(files, &Config::default())
    }

    pub fn with_config(files: Vec<String>, config: &Config) -> Self {
        Self {
            doc: Document::new(),
            viewport: Viewport::new(),
            documents: DocumentList::new(files),
            search: SearchEngine::new(config.ignore_case()),
            cursor: SearchState::new(),
            mode: Mode::View,
            page_size: config.page_size(),
            show_usage: config.show_usage(),
            width: 0,
            height: 0,
        }
    }

    // --- content -------------------------------------------------------

    /// Replace the document; both offsets return to the origin.
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.doc.set_content(text);
        self.viewport.reset();
        self.cursor.invalidate();
        tracing::debug!(
            target: "pager.render",
            bytes = self.doc.len(),
            lines = self.doc.line_count(),
            "set_content"
        );
    }

    /// Append streamed text; offsets are left where they are.
    pub fn add_content(&mut self, text: &str) {
        self.doc.add_content(text);
    }

    /// Keep only `doc[byte..]` as the new content (clear-screen directive).
    pub fn restart_from(&mut self, byte: usize) {
        self.doc.retain_from(byte);
        self.viewport.reset();
        self.cursor.invalidate();
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn line_count(&self) -> usize {
        self.doc.line_count()
    }

    // --- geometry ------------------------------------------------------

    /// Record the terminal size and pull the offsets back inside it.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = usize::from(width);
        self.height = usize::from(height);
        let bounds = self.bounds();
        self.viewport.clamp_to(bounds);
    }

    /// Terminal size as last recorded (columns, rows).
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn body_rows(&self) -> usize {
        self.height.saturating_sub(STATUS_ROWS)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.doc.line_count(), self.width, self.body_rows())
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn show_usage(&self) -> bool {
        self.show_usage
    }

    // --- viewport ------------------------------------------------------

    pub fn scroll_down(&mut self) -> bool {
        let b = self.bounds();
        self.viewport.scroll_down(b)
    }

    pub fn scroll_up(&mut self) -> bool {
        self.viewport.scroll_up()
    }

    pub fn scroll_right(&mut self) -> bool {
        let b = self.bounds();
        self.viewport.scroll_right(b)
    }

    pub fn scroll_left(&mut self) -> bool {
        self.viewport.scroll_left()
    }

    pub fn page_down(&mut self) {
        let b = self.bounds();
        self.viewport.page_down(b, self.page_size);
    }

    pub fn page_up(&mut self) {
        self.viewport.page_up(self.page_size);
    }

    pub fn jump_to_top(&mut self) {
        self.viewport.jump_to_top();
    }

    pub fn jump_to_bottom(&mut self) {
        let b = self.bounds();
        self.viewport.jump_to_bottom(b);
    }

    // --- mode & search ---------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn query(&self) -> &str {
        self.cursor.query()
    }

    /// 1-based ordinal of the focused match.
    pub fn match_ordinal(&self) -> usize {
        self.cursor.ordinal()
    }

    /// `/` pressed: start a fresh query.
    pub fn begin_query(&mut self) {
        self.cursor.clear();
        self.set_mode(Mode::QueryEntry);
    }

    pub fn push_query_char(&mut self, ch: char) {
        self.cursor.push_char(ch);
    }

    pub fn pop_query_char(&mut self) {
        self.cursor.pop_char();
    }

    /// Enter pressed while typing: pin the query and jump to the first match.
    pub fn commit_query(&mut self) {
        self.set_mode(Mode::SearchNavigate);
        self.cursor.reset_ordinal();
        self.search_forward();
    }

    /// Leave search entirely, dropping the query.
    pub fn cancel_search(&mut self) {
        self.cursor.clear();
        self.set_mode(Mode::View);
    }

    pub fn match_count(&mut self) -> usize {
        self.search.find_all(&self.doc, self.cursor.query()).len()
    }

    /// Move the focused match forward and put its line on the first body row.
    pub fn search_forward(&mut self) -> bool {
        let matches = self.search.find_all(&self.doc, self.cursor.query());
        let Some(i) = self.cursor.forward(matches.len()) else {
            return false;
        };
        let line = matches[i].line;
        self.viewport.jump_to_line(line);
        tracing::debug!(target: "pager.search", ordinal = i + 1, line, "search_forward");
        true
    }

    pub fn search_backward(&mut self) -> bool {
        let matches = self.search.find_all(&self.doc, self.cursor.query());
        let Some(i) = self.cursor.backward(matches.len()) else {
            return false;
        };
        let line = matches[i].line;
        self.viewport.jump_to_line(line);
        tracing::debug!(target: "pager.search", ordinal = i + 1, line, "search_backward");
        true
    }

    /// Borrow what one frame needs: the document and offsets read-only, the
    /// search engine mutably for highlight spans.
    pub fn render_view(&mut self) -> RenderView<'_> {
        RenderView {
            doc: &self.doc,
            viewport: &self.viewport,
            body_rows: self.height.saturating_sub(STATUS_ROWS),
            width: self.width,
            highlighter: Highlighter {
                engine: &mut self.search,
                query: self.cursor.query(),
            },
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            tracing::debug!(target: "pager.input", from = ?self.mode, to = ?mode, "mode_change");
            self.mode = mode;
        }
    }

    // --- documents -------------------------------------------------------

    pub fn files(&self) -> &[String] {
        self.documents.files()
    }

    pub fn index(&self) -> usize {
        self.documents.index()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Identifier of the displayed document, if any.
    pub fn file(&self) -> Option<&str> {
        self.documents.current()
    }

    pub fn next_document(&mut self) -> NavOutcome {
        self.documents.advance()
    }

    pub fn previous_document(&mut self) -> NavOutcome {
        self.documents.retreat()
    }
}
