//! Property-based tests for viewport clamp invariants.

use core_model::{Bounds, Viewport};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Down,
    Up,
    Right,
    Left,
    PageDown,
    PageUp,
    Top,
    Bottom,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Down),
        Just(Op::Up),
        Just(Op::Right),
        Just(Op::Left),
        Just(Op::PageDown),
        Just(Op::PageUp),
        Just(Op::Top),
        Just(Op::Bottom),
    ]
}

fn apply(vp: &mut Viewport, b: Bounds, op: Op) {
    match op {
        Op::Down => {
            vp.scroll_down(b);
        }
        Op::Up => {
            vp.scroll_up();
        }
        Op::Right => {
            vp.scroll_right(b);
        }
        Op::Left => {
            vp.scroll_left();
        }
        Op::PageDown => vp.page_down(b, 29),
        Op::PageUp => vp.page_up(29),
        Op::Top => vp.jump_to_top(),
        Op::Bottom => vp.jump_to_bottom(b),
    }
}

proptest! {
    // Any sequence of scroll operations keeps both offsets inside their ranges.
    #[test]
    fn offsets_stay_in_range(
        lines in 0usize..500,
        width in 1usize..200,
        height in 1usize..80,
        ops in proptest::collection::vec(op(), 0..200),
    ) {
        let b = Bounds::new(lines, width, height);
        let mut vp = Viewport::new();
        for op in ops {
            apply(&mut vp, b, op);
            prop_assert!(vp.first_line() <= lines.saturating_sub(height));
            prop_assert!(vp.first_col() <= width);
        }
    }

    // Repeated scroll-down saturates exactly at lineCount - height.
    #[test]
    fn scroll_down_saturates(lines in 0usize..300, height in 1usize..60, presses in 0usize..400) {
        let b = Bounds::new(lines, 80, height);
        let mut vp = Viewport::new();
        for _ in 0..presses {
            vp.scroll_down(b);
        }
        prop_assert_eq!(vp.first_line(), presses.min(lines.saturating_sub(height)));
    }

    // Page down never overshoots the last page regardless of page size.
    #[test]
    fn page_down_never_overshoots(lines in 0usize..1000, height in 1usize..60, page in 1usize..100, presses in 1usize..50) {
        let b = Bounds::new(lines, 80, height);
        let mut vp = Viewport::new();
        for _ in 0..presses {
            vp.page_down(b, page);
        }
        prop_assert!(vp.first_line() <= b.max_first_line());
    }
}
