use crate::Outcome;
use core_model::NavOutcome;
use core_state::Pager;

pub(crate) fn next(pager: &mut Pager) -> Outcome {
    signal(pager.next_document())
}

pub(crate) fn previous(pager: &mut Pager) -> Outcome {
    signal(pager.previous_document())
}

/// Boundary moves are silent: no switch, keep polling.
fn signal(nav: NavOutcome) -> Outcome {
    match nav {
        NavOutcome::Switched { .. } => Outcome::AdvanceDocument,
        NavOutcome::AtBoundary => Outcome::Continue,
    }
}
