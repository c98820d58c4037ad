//! Viewport controller: the visible window into the document.
//!
//! Two independent scalar offsets rather than a cursor: the pager has nothing
//! to edit, only a window to move. Every scroll operation clamps against the
//! `Bounds` supplied by the caller, so a terminal resize is handled simply by
//! passing new bounds (and optionally calling `clamp_to`).
//!
//! Invariants after any scroll operation:
//! * `first_line <= bounds.max_first_line()` unless a search jump placed it
//!   further down (scrolling down is then blocked, scrolling up works).
//! * `first_col <= bounds.width`.

/// Content and screen extents the offsets are clamped against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub line_count: usize,
    /// Terminal width in columns.
    pub width: usize,
    /// Rows available for document text.
    pub height: usize,
}

impl Bounds {
    pub const fn new(line_count: usize, width: usize, height: usize) -> Self {
        Self {
            line_count,
            width,
            height,
        }
    }

    /// Largest vertical offset reachable by scrolling.
    pub fn max_first_line(&self) -> usize {
        self.line_count.saturating_sub(self.height)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    first_line: usize,
    first_col: usize,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// First visible logical line (0-based).
    pub fn first_line(&self) -> usize {
        self.first_line
    }

    /// Leading visible columns skipped on every rendered line.
    pub fn first_col(&self) -> usize {
        self.first_col
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn scroll_down(&mut self, b: Bounds) -> bool {
        if self.first_line < b.max_first_line() {
            self.first_line += 1;
            return true;
        }
        false
    }

    pub fn scroll_up(&mut self) -> bool {
        if self.first_line > 0 {
            self.first_line -= 1;
            return true;
        }
        false
    }

    pub fn scroll_right(&mut self, b: Bounds) -> bool {
        if self.first_col < b.width {
            self.first_col += 1;
            return true;
        }
        false
    }

    pub fn scroll_left(&mut self) -> bool {
        if self.first_col > 0 {
            self.first_col -= 1;
            return true;
        }
        false
    }

    /// Advance by `page` lines or land on the last page.
    pub fn page_down(&mut self, b: Bounds, page: usize) {
        let max = b.max_first_line();
        self.first_line = match self.first_line.checked_add(page) {
            Some(next) if next < max => next,
            _ => max,
        };
    }

    pub fn page_up(&mut self, page: usize) {
        self.first_line = self.first_line.saturating_sub(page);
    }

    pub fn jump_to_top(&mut self) {
        self.first_line = 0;
        self.first_col = 0;
    }

    pub fn jump_to_bottom(&mut self, b: Bounds) {
        self.first_line = b.max_first_line();
        self.first_col = 0;
    }

    /// Put `line` on the top row (search hits). Not clamped to the scroll range.
    pub fn jump_to_line(&mut self, line: usize) {
        self.first_line = line;
    }

    /// Pull both offsets back inside `b` (after a resize or content swap).
    pub fn clamp_to(&mut self, b: Bounds) {
        self.first_line = self.first_line.min(b.max_first_line());
        self.first_col = self.first_col.min(b.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_to_bottom_three_lines_height_two() {
        let mut vp = Viewport::new();
        vp.jump_to_bottom(Bounds::new(3, 80, 2));
        assert_eq!(vp.first_line(), 1);
    }

    #[test]
    fn scroll_down_blocks_at_max() {
        let b = Bounds::new(5, 80, 3);
        let mut vp = Viewport::new();
        assert!(vp.scroll_down(b));
        assert!(vp.scroll_down(b));
        assert!(!vp.scroll_down(b));
        assert_eq!(vp.first_line(), 2);
        assert!(vp.scroll_up());
        assert_eq!(vp.first_line(), 1);
    }

    #[test]
    fn short_content_never_scrolls() {
        let b = Bounds::new(2, 80, 10);
        let mut vp = Viewport::new();
        assert!(!vp.scroll_down(b));
        vp.page_down(b, 29);
        assert_eq!(vp.first_line(), 0);
        vp.jump_to_bottom(b);
        assert_eq!(vp.first_line(), 0);
    }

    #[test]
    fn page_moves_by_page_size_and_clamps() {
        let b = Bounds::new(100, 80, 20);
        let mut vp = Viewport::new();
        vp.page_down(b, 29);
        assert_eq!(vp.first_line(), 29);
        vp.page_down(b, 29);
        assert_eq!(vp.first_line(), 58);
        vp.page_down(b, 29);
        assert_eq!(vp.first_line(), 80);
        vp.page_up(29);
        assert_eq!(vp.first_line(), 51);
        vp.page_up(100);
        assert_eq!(vp.first_line(), 0);
    }

    #[test]
    fn horizontal_clamps_to_width() {
        let b = Bounds::new(1, 2, 1);
        let mut vp = Viewport::new();
        assert!(!vp.scroll_left());
        assert!(vp.scroll_right(b));
        assert!(vp.scroll_right(b));
        assert!(!vp.scroll_right(b));
        assert_eq!(vp.first_col(), 2);
    }

    #[test]
    fn top_and_bottom_reset_horizontal() {
        let b = Bounds::new(50, 80, 10);
        let mut vp = Viewport::new();
        vp.scroll_right(b);
        vp.jump_to_bottom(b);
        assert_eq!((vp.first_line(), vp.first_col()), (40, 0));
        vp.scroll_right(b);
        vp.jump_to_top();
        assert_eq!((vp.first_line(), vp.first_col()), (0, 0));
    }

    #[test]
    fn search_jump_past_range_blocks_scroll_down_only() {
        let b = Bounds::new(10, 80, 8);
        let mut vp = Viewport::new();
        vp.jump_to_line(9);
        assert!(!vp.scroll_down(b));
        assert!(vp.scroll_up());
        vp.clamp_to(b);
        assert_eq!(vp.first_line(), 2);
    }
}
