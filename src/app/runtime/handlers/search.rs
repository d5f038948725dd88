use tokio::sync::mpsc;

use crate::analytics::{AnalyticsEvent, AnalyticsSink};
use crate::app::runtime::workers::pagination::PageUpdate;
use crate::state::{Item, SearchParams, SessionOutput, SessionState};

use super::{emit_empty_state, emit_loading, emit_view_update};

/// What: Handle the popular list delivered by the popular-content worker.
///
/// Inputs:
/// - `state`: Session state
/// - `items`: Popular list (empty when the fetch failed)
/// - `output_tx`: Channel sender for session outputs
pub fn handle_popular(
    state: &mut SessionState,
    items: Vec<Item>,
    output_tx: &mpsc::UnboundedSender<SessionOutput>,
) {
    emit_view_update(state.view.popular_loaded(items), output_tx);
}

/// What: Handle a pagination snapshot.
///
/// Inputs:
/// - `state`: Session state
/// - `update`: Snapshot tagged with the id and params of its search
/// - `output_tx`: Channel sender for session outputs
/// - `analytics`: Analytics sink
///
/// Details:
/// - Snapshots whose id differs from `latest_search_id` belong to a superseded
///   search and are dropped, even when their query text matches the current one
/// - A settled, successful page records a results-shown event and updates the empty state
pub fn handle_page_update(
    state: &mut SessionState,
    update: PageUpdate<SearchParams, Item>,
    output_tx: &mpsc::UnboundedSender<SessionOutput>,
    analytics: &dyn AnalyticsSink,
) {
    let PageUpdate {
        id,
        params,
        snapshot,
    } = update;
    if id != state.latest_search_id {
        tracing::debug!(
            id,
            latest = state.latest_search_id,
            query = %params.query,
            "[Session] dropping snapshot for a superseded search"
        );
        return;
    }
    emit_loading(state, snapshot.is_loading, output_tx);
    let settled = !snapshot.is_loading && !snapshot.failed;
    let has_results = !snapshot.items.is_empty();
    emit_view_update(state.view.search_results(snapshot.items), output_tx);
    if settled {
        analytics.track(AnalyticsEvent::ResultsShown {
            query: params.query,
            page: snapshot.page_number,
            has_results,
        });
        emit_empty_state(state, !has_results, output_tx);
    }
}
