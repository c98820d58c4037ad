//! Search engine: query compilation, match listing over the de-colorized
//! projection, and the match ordinal used for forward/backward cycling.
//!
//! Matching semantics:
//! * The query is a regex (case-insensitive unless configured otherwise).
//!   An empty or invalid query yields no matches; it is never an error for
//!   the user.
//! * Matches are whole lines: one `Match` per line containing the query,
//!   found in document order over `strip_escapes(text)` so a hit is never
//!   split by invisible escape bytes.
//! * Compiled patterns are cached per query string, and the match list per
//!   (document revision, query), so cycling with `n`/`N` never recompiles or
//!   rescans an unchanged document.

use core_text::{Document, count_lines, strip_escapes};
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::ops::Range;
use thiserror::Error;

mod cursor;
pub use cursor::SearchState;

/// Upper bound on cached compiled queries (incremental typing produces one per keystroke).
const PATTERN_CACHE_CAP: usize = 64;

#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// One line containing the query: byte span in the projection plus its line index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub line: usize,
}

/// Both forms of a compiled query.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    /// `^.*(?:query).*$` in multi-line mode: one hit per matching line.
    lines: Regex,
    /// The bare query, for in-line highlight spans.
    hits: Regex,
}

fn build(query: &str, ignore_case: bool) -> Result<CompiledQuery, SearchError> {
    let compile = |pattern: &str, multi_line: bool| {
        RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .multi_line(multi_line)
            .build()
    };
    let built = compile(&format!("^.*(?:{query}).*$"), true)
        .and_then(|lines| compile(query, false).map(|hits| CompiledQuery { lines, hits }));
    if built.is_err() {
        tracing::debug!(target: "pager.search", query_len = query.len(), "pattern_invalid");
    }
    built.map_err(SearchError::from)
}

#[derive(Debug)]
struct MatchCache {
    revision: u64,
    query: String,
    matches: Vec<Match>,
}

#[derive(Debug)]
pub struct SearchEngine {
    ignore_case: bool,
    patterns: HashMap<String, Result<CompiledQuery, SearchError>>,
    matches: Option<MatchCache>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SearchEngine {
    pub fn new(ignore_case: bool) -> Self {
        Self {
            ignore_case,
            patterns: HashMap::new(),
            matches: None,
        }
    }

    /// Compile (or fetch from cache) the patterns for `query`.
    pub fn compile(&mut self, query: &str) -> Result<&CompiledQuery, SearchError> {
        if self.patterns.len() >= PATTERN_CACHE_CAP && !self.patterns.contains_key(query) {
            self.patterns.clear();
        }
        let ignore_case = self.ignore_case;
        let entry = self
            .patterns
            .entry(query.to_string())
            .or_insert_with(|| build(query, ignore_case));
        match entry {
            Ok(compiled) => Ok(compiled),
            Err(err) => Err(err.clone()),
        }
    }

    /// Ordered matches of `query` in `doc`. Empty or invalid queries yield none.
    pub fn find_all(&mut self, doc: &Document, query: &str) -> &[Match] {
        let fresh = self
            .matches
            .as_ref()
            .is_some_and(|c| c.revision == doc.revision() && c.query == query);
        if !fresh {
            let matches = self.scan(doc, query);
            tracing::debug!(
                target: "pager.search",
                query_len = query.len(),
                matches = matches.len(),
                revision = doc.revision(),
                "find_all"
            );
            self.matches = Some(MatchCache {
                revision: doc.revision(),
                query: query.to_string(),
                matches,
            });
        }
        self.matches
            .as_ref()
            .map(|c| c.matches.as_slice())
            .unwrap_or_default()
    }

    fn scan(&mut self, doc: &Document, query: &str) -> Vec<Match> {
        if query.is_empty() {
            return Vec::new();
        }
        let Ok(compiled) = self.compile(query) else {
            return Vec::new();
        };
        let lines = compiled.lines.clone();
        let projection = strip_escapes(doc.text());
        let bytes = projection.as_bytes();
        // Patterns that match the empty string also hit the empty tail after a
        // final newline, which is not a line.
        let total = count_lines(&projection);
        let mut out = Vec::new();
        let mut line = 0usize;
        let mut counted_to = 0usize;
        for m in lines.find_iter(&projection) {
            line += bytes[counted_to..m.end()]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            counted_to = m.end();
            if line >= total {
                break;
            }
            out.push(Match {
                start: m.start(),
                end: m.end(),
                line,
            });
        }
        out
    }

    /// Character ranges of `query` hits inside one line of visible text.
    pub fn highlight_ranges(&mut self, visible: &str, query: &str) -> Vec<Range<usize>> {
        if query.is_empty() || visible.is_empty() {
            return Vec::new();
        }
        let Ok(compiled) = self.compile(query) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for m in compiled.hits.find_iter(visible) {
            if m.start() == m.end() {
                continue;
            }
            let start = visible[..m.start()].chars().count();
            let len = visible[m.start()..m.end()].chars().count();
            out.push(start..start + len);
        }
        out
    }
}
