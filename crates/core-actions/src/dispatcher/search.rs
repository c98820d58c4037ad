use crate::Action;
use core_state::Pager;

pub(crate) fn handle_search(action: Action, pager: &mut Pager) {
    match action {
        Action::BeginQuery => pager.begin_query(),
        Action::QueryChar(c) => pager.push_query_char(c),
        Action::QueryBackspace => pager.pop_query_char(),
        Action::CommitQuery => {
            pager.commit_query();
            tracing::debug!(
                target: "pager.search",
                query_len = pager.query().len(),
                matches = pager.match_count(),
                "query_committed"
            );
        }
        Action::CancelSearch => pager.cancel_search(),
        Action::SearchForward => {
            pager.search_forward();
        }
        Action::SearchBackward => {
            pager.search_backward();
        }
        _ => {}
    }
}
