//! Session message handlers, one per channel kind.

mod intent;
mod search;

pub use intent::handle_intent;
pub use search::{handle_page_update, handle_popular};

use tokio::sync::mpsc;

use crate::logic::ViewUpdate;
use crate::state::{Item, SessionOutput};

/// What: Forward a composer update to the UI boundary.
///
/// Inputs:
/// - `update`: Visibility/display changes from the view composer
/// - `output_tx`: Channel sender for session outputs
fn emit_view_update(update: ViewUpdate<Item>, output_tx: &mpsc::UnboundedSender<SessionOutput>) {
    if let Some(visible) = update.popular_visible {
        let _ = output_tx.send(SessionOutput::PopularVisible(visible));
    }
    if let Some(list) = update.display {
        let _ = output_tx.send(SessionOutput::DisplayList(list));
    }
}

/// What: Emit the loading flag when it changed.
fn emit_loading(
    state: &mut crate::state::SessionState,
    loading: bool,
    output_tx: &mpsc::UnboundedSender<SessionOutput>,
) {
    if state.loading != loading {
        state.loading = loading;
        let _ = output_tx.send(SessionOutput::Loading(loading));
    }
}

/// What: Emit the empty state when it changed.
///
/// Details:
/// - Hiding is only emitted when the state was previously shown
fn emit_empty_state(
    state: &mut crate::state::SessionState,
    visible: bool,
    output_tx: &mpsc::UnboundedSender<SessionOutput>,
) {
    let was_visible = state.empty_state.as_ref().is_some_and(|(_, v)| *v);
    if !visible && !was_visible {
        return;
    }
    let next = (state.query.clone(), visible);
    if state.empty_state.as_ref() == Some(&next) {
        return;
    }
    state.empty_state = Some(next.clone());
    let _ = output_tx.send(SessionOutput::EmptyState {
        query: next.0,
        visible: next.1,
    });
}
