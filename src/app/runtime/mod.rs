use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::analytics::AnalyticsSink;
use crate::settings::Settings;
use crate::sources::SearchService;
use crate::state::{Intent, SessionOutput, SessionState};

mod channels;
mod event_loop;
mod handlers;
pub mod workers;

use channels::Channels;
use event_loop::run_session;

/// Handle to a running search session.
pub struct SessionHandle {
    /// Sender for raw UI intents; dropping it ends the session.
    pub intents: mpsc::UnboundedSender<Intent>,
    /// Receiver of session outputs.
    pub outputs: mpsc::UnboundedReceiver<SessionOutput>,
    /// Session loop task.
    pub task: JoinHandle<()>,
}

/// What: Start a search session: spawn its workers and its session loop.
///
/// Inputs:
/// - `service`: Remote search service (injected, substitutable in tests)
/// - `analytics`: Analytics sink
/// - `settings`: Debounce, delay, sort and pagination settings
///
/// Output:
/// - `SessionHandle` carrying the intent sender and the output receiver
///
/// Details:
/// - Must be called inside a tokio runtime
/// - The session, the pagination worker and the popular worker all stop once
///   `SessionHandle::intents` is dropped
pub fn spawn_session(
    service: Arc<dyn SearchService>,
    analytics: Arc<dyn AnalyticsSink>,
    settings: &Settings,
) -> SessionHandle {
    let (intent_tx, intent_rx) = mpsc::unbounded_channel::<Intent>();
    let (output_tx, output_rx) = mpsc::unbounded_channel::<SessionOutput>();
    let channels = Channels::new(&service, settings, intent_rx, output_tx);
    let state = SessionState::new(settings);
    let task = tokio::spawn(async move {
        run_session(state, channels, analytics.as_ref()).await;
    });
    SessionHandle {
        intents: intent_tx,
        outputs: output_rx,
        task,
    }
}
