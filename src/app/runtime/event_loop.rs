use tokio::select;

use crate::analytics::AnalyticsSink;
use crate::state::SessionState;

use super::channels::Channels;
use super::handlers::{handle_intent, handle_page_update, handle_popular};

/// What: Process one message from any session channel.
///
/// Inputs:
/// - `state`: Session state
/// - `channels`: Communication channels for the UI boundary and workers
/// - `analytics`: Analytics sink
///
/// Output: `true` if the session loop should exit, `false` to continue
///
/// Details:
/// - Waits for and processes a single message; exits once the intent channel closes
async fn process_channel_messages(
    state: &mut SessionState,
    channels: &mut Channels,
    analytics: &dyn AnalyticsSink,
) -> bool {
    select! {
        intent = channels.intent_rx.recv() => {
            let Some(intent) = intent else {
                return true;
            };
            handle_intent(state, intent, channels, analytics);
            false
        }
        Some(items) = channels.popular_rx.recv() => {
            tracing::debug!("[Session] popular list received: {} items", items.len());
            handle_popular(state, items, &channels.output_tx);
            false
        }
        Some(update) = channels.page_update_rx.recv() => {
            handle_page_update(state, update, &channels.output_tx, analytics);
            false
        }
    }
}

/// What: Run the session loop until the UI boundary drops its intent sender.
///
/// Inputs:
/// - `state`: Initial session state
/// - `channels`: Communication channels for the UI boundary and workers
/// - `analytics`: Analytics sink
///
/// Output: None (runs until exit condition is met)
///
/// Details:
/// - All component state is mutated on this task only, in message arrival order
pub async fn run_session(
    mut state: SessionState,
    mut channels: Channels,
    analytics: &dyn AnalyticsSink,
) {
    tracing::debug!("[Session] started");
    while !process_channel_messages(&mut state, &mut channels, analytics).await {}
    tracing::debug!("[Session] intent channel closed; stopping");
}
