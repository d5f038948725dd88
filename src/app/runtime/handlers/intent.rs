use crate::analytics::{AnalyticsEvent, AnalyticsSink};
use crate::app::runtime::channels::Channels;
use crate::app::runtime::workers::pagination::PageRequest;
use crate::logic::navigation_for_tap;
use crate::state::{Intent, SessionOutput, SessionState};

use super::{emit_empty_state, emit_loading, emit_view_update};

/// What: Handle one raw intent from the UI boundary.
///
/// Inputs:
/// - `state`: Session state
/// - `intent`: Raw intent
/// - `channels`: Channel senders for outputs and workers
/// - `analytics`: Analytics sink
///
/// Details:
/// - Row visibility feeds the near-bottom detector; a rising edge requests the next page
///   while a search is active
/// - Taps are paired with the latest display list
/// - Everything else goes through the query coalescer; non-empty queries start a new search
pub fn handle_intent(
    state: &mut SessionState,
    intent: Intent,
    channels: &Channels,
    analytics: &dyn AnalyticsSink,
) {
    match intent {
        Intent::RowVisible { row, total } => {
            if state.scroll.observe(row, total) && !state.query.is_empty() {
                tracing::debug!(row, total, "[Session] near bottom; requesting next page");
                let _ = channels.page_req_tx.send(PageRequest::NextPage);
            }
        }
        Intent::ItemTapped(item) => {
            if let Some(nav) = navigation_for_tap(item, state.view.displayed()) {
                let _ = channels.output_tx.send(SessionOutput::Navigate(nav));
            }
        }
        intent => handle_query_intent(state, &intent, channels, analytics),
    }
}

/// What: Apply a query-affecting intent.
fn handle_query_intent(
    state: &mut SessionState,
    intent: &Intent,
    channels: &Channels,
    analytics: &dyn AnalyticsSink,
) {
    let out = state.coalescer.coalesce(intent);
    let output_tx = &channels.output_tx;
    if out.first_appearance {
        analytics.track(AnalyticsEvent::ViewAppeared);
        let _ = channels.popular_trigger_tx.send(());
    }
    if out.cleared {
        analytics.track(AnalyticsEvent::SearchCleared);
    }
    if out.reset_field {
        let _ = output_tx.send(SessionOutput::SearchFieldText(String::new()));
    }
    if let Some(focus) = out.focus {
        let _ = output_tx.send(SessionOutput::Focus(focus));
    }
    if out.resign_focus {
        let _ = output_tx.send(SessionOutput::ResignFocus);
    }
    let Some(query) = out.query else {
        return;
    };
    tracing::debug!(query = %query, "[Session] query changed");
    state.query.clone_from(&query);
    state.latest_search_id += 1;
    state.scroll.reset();
    emit_empty_state(state, false, output_tx);
    emit_view_update(state.view.query_changed(&query), output_tx);
    if query.is_empty() {
        emit_loading(state, false, output_tx);
    } else {
        let params = state.search_template.with_query(&query);
        let _ = channels.page_req_tx.send(PageRequest::NewSearch {
            id: state.latest_search_id,
            params,
        });
    }
}
