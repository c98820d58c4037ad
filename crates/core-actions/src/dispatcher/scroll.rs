use crate::ScrollKind;
use core_state::Pager;

pub(crate) fn handle_scroll(kind: ScrollKind, pager: &mut Pager) {
    let moved = match kind {
        ScrollKind::LineDown => pager.scroll_down(),
        ScrollKind::LineUp => pager.scroll_up(),
        ScrollKind::ColumnRight => pager.scroll_right(),
        ScrollKind::ColumnLeft => pager.scroll_left(),
        ScrollKind::PageDown => {
            pager.page_down();
            true
        }
        ScrollKind::PageUp => {
            pager.page_up();
            true
        }
        ScrollKind::Top => {
            pager.jump_to_top();
            true
        }
        ScrollKind::Bottom => {
            pager.jump_to_bottom();
            true
        }
    };
    if !moved {
        tracing::trace!(target: "pager.input", ?kind, "scroll_blocked");
    }
}
