//! Query text plus the focused-match ordinal.
//!
//! The ordinal is 1-based and names the match the view was last moved to.
//! `located` is false until the first jump after a (re)start so that the
//! first `forward` lands on the current ordinal instead of skipping it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    ordinal: usize,
    located: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            ordinal: 1,
            located: false,
        }
    }
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn push_char(&mut self, ch: char) {
        self.query.push(ch);
    }

    pub fn pop_char(&mut self) -> Option<char> {
        self.query.pop()
    }

    /// Forget the query and start over from the first match.
    pub fn clear(&mut self) {
        self.query.clear();
        self.reset_ordinal();
    }

    /// Restart cycling at the first match (query committed with Enter).
    pub fn reset_ordinal(&mut self) {
        self.ordinal = 1;
        self.located = false;
    }

    /// The document changed under the cursor; the next `forward` re-locates.
    pub fn invalidate(&mut self) {
        self.located = false;
    }

    /// Index (0-based) of the match to jump to, or `None` when nothing moves.
    pub fn forward(&mut self, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        if !self.located {
            self.ordinal = self.ordinal.clamp(1, count);
            self.located = true;
            return Some(self.ordinal - 1);
        }
        if self.ordinal < count {
            self.ordinal += 1;
            return Some(self.ordinal - 1);
        }
        None
    }

    pub fn backward(&mut self, count: usize) -> Option<usize> {
        if count == 0 || !self.located {
            return None;
        }
        self.ordinal = self.ordinal.min(count);
        if self.ordinal > 1 {
            self.ordinal -= 1;
            return Some(self.ordinal - 1);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_forward_lands_on_first_match() {
        let mut s = SearchState::new();
        assert_eq!(s.forward(3), Some(0));
        assert_eq!(s.forward(3), Some(1));
        assert_eq!(s.forward(3), Some(2));
        assert_eq!(s.forward(3), None);
        assert_eq!(s.ordinal(), 3);
    }

    #[test]
    fn forward_then_backward_returns_to_same_match() {
        let mut s = SearchState::new();
        s.forward(5);
        let here = s.forward(5);
        s.forward(5);
        assert_eq!(s.backward(5), here);
    }

    #[test]
    fn backward_saturates_at_first_match() {
        let mut s = SearchState::new();
        assert_eq!(s.backward(4), None);
        s.forward(4);
        assert_eq!(s.backward(4), None);
        assert_eq!(s.ordinal(), 1);
    }

    #[test]
    fn no_matches_is_a_no_op() {
        let mut s = SearchState::new();
        assert_eq!(s.forward(0), None);
        assert_eq!(s.backward(0), None);
        assert_eq!(s.ordinal(), 1);
    }

    #[test]
    fn reset_and_invalidate() {
        let mut s = SearchState::new();
        s.push_char('a');
        s.push_char('b');
        assert_eq!(s.pop_char(), Some('b'));
        assert_eq!(s.query(), "a");
        s.forward(3);
        s.forward(3);
        s.invalidate();
        assert_eq!(s.forward(3), Some(1));
        s.reset_ordinal();
        assert_eq!(s.forward(3), Some(0));
        s.clear();
        assert_eq!(s.query(), "");
        assert_eq!(s.ordinal(), 1);
    }

    #[test]
    fn shrunken_match_list_clamps_ordinal() {
        let mut s = SearchState::new();
        for _ in 0..5 {
            s.forward(5);
        }
        s.invalidate();
        assert_eq!(s.forward(2), Some(1));
    }
}
