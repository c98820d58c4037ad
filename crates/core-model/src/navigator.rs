//! Multi-document navigator: an ordered list of document identifiers with a
//! current index. Movement clamps at both ends; a move that would leave the
//! list reports `AtBoundary` and leaves the index untouched.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The index moved; the caller should load the newly selected document.
    Switched { index: usize },
    AtBoundary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentList {
    files: Vec<String>,
    index: usize,
}

impl DocumentList {
    pub fn new(files: Vec<String>) -> Self {
        Self { files, index: 0 }
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Identifier of the current document, if any.
    pub fn current(&self) -> Option<&str> {
        self.files.get(self.index).map(String::as_str)
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.files.len()
    }

    pub fn advance(&mut self) -> NavOutcome {
        if self.is_last() {
            tracing::debug!(target: "pager.nav", index = self.index, "advance_at_last_document");
            return NavOutcome::AtBoundary;
        }
        self.index += 1;
        tracing::debug!(target: "pager.nav", index = self.index, "advance");
        NavOutcome::Switched { index: self.index }
    }

    pub fn retreat(&mut self) -> NavOutcome {
        if self.index == 0 {
            tracing::debug!(target: "pager.nav", "retreat_at_first_document");
            return NavOutcome::AtBoundary;
        }
        self.index -= 1;
        tracing::debug!(target: "pager.nav", index = self.index, "retreat");
        NavOutcome::Switched { index: self.index }
    }
}
