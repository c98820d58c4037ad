//! Dispatcher applying `Action` to the pager.
//!
//! Decomposed by concern:
//! * `scroll`    - viewport movement
//! * `search`    - query editing, commit/cancel, match cycling
//! * `documents` - navigator moves and the `AdvanceDocument` signal

use crate::{Action, Outcome};
use core_state::Pager;

mod documents;
mod scroll;
mod search;

/// Apply one action. Everything except quitting and a successful document
/// switch continues the loop.
pub fn dispatch(action: Action, pager: &mut Pager) -> Outcome {
    match action {
        Action::Scroll(kind) => {
            scroll::handle_scroll(kind, pager);
            Outcome::Continue
        }
        Action::BeginQuery
        | Action::QueryChar(_)
        | Action::QueryBackspace
        | Action::CommitQuery
        | Action::CancelSearch
        | Action::SearchForward
        | Action::SearchBackward => {
            search::handle_search(action, pager);
            Outcome::Continue
        }
        Action::NextDocument => documents::next(pager),
        Action::PreviousDocument => documents::previous(pager),
        Action::Quit => Outcome::Quit,
        Action::Ignore => Outcome::Continue,
    }
}
