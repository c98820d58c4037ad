//! Status line composition.
//!
//! Two stages, as for every line the renderer paints from state:
//! 1. `compose_status` picks the ordered `StatusSegment`s for the current
//!    mode, document list and configuration.
//! 2. `format_status` turns them into the final text.
//!
//! Shape (pieces in brackets are conditional):
//! `USAGE [exit: ESC/q] [scroll: j,k/C-n,C-p] [next file hint][mode segment]`
//! where the mode segment is the file name in View, the query being typed in
//! QueryEntry and the pinned query plus the vertical offset in
//! SearchNavigate.

use core_state::Mode;
use std::fmt::Write as _;

pub const USAGE: &str = "USAGE [exit: ESC/q] [scroll: j,k/C-n,C-p] ";
pub const NEXT_FILE_HINT: &str = "[next file: Ctrl-h,Ctrl-l]";

/// What the status line needs to know about the pager.
pub struct StatusContext<'a> {
    pub mode: Mode,
    pub file: Option<&'a str>,
    pub query: &'a str,
    /// Vertical offset (first visible line).
    pub first_line: usize,
    pub document_count: usize,
    pub show_usage: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Usage,
    NextFileHint,
    File(&'a str),
    QueryEntry(&'a str),
    Searching { query: &'a str, first_line: usize },
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let mut out = Vec::with_capacity(4);
    if ctx.show_usage {
        out.push(StatusSegment::Usage);
        if ctx.document_count > 1 {
            out.push(StatusSegment::NextFileHint);
        }
    }
    if let Some(name) = ctx.file.filter(|f| !f.is_empty()) {
        out.push(StatusSegment::File(name));
    }
    match ctx.mode {
        Mode::View => {}
        Mode::QueryEntry => out.push(StatusSegment::QueryEntry(ctx.query)),
        Mode::SearchNavigate => out.push(StatusSegment::Searching {
            query: ctx.query,
            first_line: ctx.first_line,
        }),
    }
    out
}

pub fn format_status(segments: &[StatusSegment<'_>]) -> String {
    let mut s = String::with_capacity(96);
    for seg in segments {
        match seg {
            StatusSegment::Usage => s.push_str(USAGE),
            StatusSegment::NextFileHint => s.push_str(NEXT_FILE_HINT),
            StatusSegment::File(name) => {
                let _ = write!(s, " :: [file: {name} ]");
            }
            StatusSegment::QueryEntry(query) => {
                let _ = write!(s, " :: [search string: {query} ]");
            }
            StatusSegment::Searching { query, first_line } => {
                let _ = write!(
                    s,
                    " :: [searching: {query} (lines: {first_line})] :: \
                     [forward search: n] [backward search: N] [exit search: ESC/Ctrl-C]"
                );
            }
        }
    }
    s
}

pub fn build_status(ctx: &StatusContext<'_>) -> String {
    format_status(&compose_status(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(mode: Mode) -> StatusContext<'static> {
        StatusContext {
            mode,
            file: None,
            query: "",
            first_line: 0,
            document_count: 1,
            show_usage: true,
        }
    }

    #[test]
    fn view_without_file_is_usage_only() {
        assert_eq!(build_status(&ctx(Mode::View)), USAGE);
    }

    #[test]
    fn view_with_files_shows_hint_and_name() {
        let c = StatusContext {
            file: Some("notes.txt"),
            document_count: 2,
            ..ctx(Mode::View)
        };
        assert_eq!(
            build_status(&c),
            "USAGE [exit: ESC/q] [scroll: j,k/C-n,C-p] [next file: Ctrl-h,Ctrl-l] :: [file: notes.txt ]"
        );
    }

    #[test]
    fn query_entry_shows_typed_query() {
        let c = StatusContext {
            query: "err",
            ..ctx(Mode::QueryEntry)
        };
        assert_eq!(
            build_status(&c),
            "USAGE [exit: ESC/q] [scroll: j,k/C-n,C-p]  :: [search string: err ]"
        );
    }

    #[test]
    fn search_navigate_shows_offset() {
        let c = StatusContext {
            file: Some("a.log"),
            query: "err",
            first_line: 12,
            ..ctx(Mode::SearchNavigate)
        };
        let segments = compose_status(&c);
        assert_eq!(
            segments,
            vec![
                StatusSegment::Usage,
                StatusSegment::File("a.log"),
                StatusSegment::Searching {
                    query: "err",
                    first_line: 12
                },
            ]
        );
        assert_eq!(
            format_status(&segments),
            "USAGE [exit: ESC/q] [scroll: j,k/C-n,C-p]  :: [file: a.log ] :: [searching: err (lines: 12)] :: \
             [forward search: n] [backward search: N] [exit search: ESC/Ctrl-C]"
        );
    }

    #[test]
    fn usage_can_be_hidden() {
        let c = StatusContext {
            file: Some("x"),
            document_count: 3,
            show_usage: false,
            ..ctx(Mode::View)
        };
        assert_eq!(build_status(&c), " :: [file: x ]");
    }
}
