use std::sync::Arc;

use tokio::sync::mpsc;

use super::workers::pagination::{PageRequest, PageUpdate, PaginationOptions};
use crate::settings::Settings;
use crate::sources::{SearchPages, SearchService};
use crate::state::{Intent, Item, SearchParams, SessionOutput};

/// What: Channel definitions for session runtime communication.
///
/// Details:
/// - Contains the channel ends the session loop uses to talk to the UI
///   boundary and to the pagination and popular-content workers
pub struct Channels {
    /// Raw intents from the UI boundary.
    pub intent_rx: mpsc::UnboundedReceiver<Intent>,
    /// Outputs towards the UI boundary.
    pub output_tx: mpsc::UnboundedSender<SessionOutput>,
    /// Requests to the pagination worker.
    pub page_req_tx: mpsc::UnboundedSender<PageRequest<SearchParams>>,
    /// Snapshots from the pagination worker.
    pub page_update_rx: mpsc::UnboundedReceiver<PageUpdate<SearchParams, Item>>,
    /// Triggers for the popular-content worker.
    pub popular_trigger_tx: mpsc::UnboundedSender<()>,
    /// Lists from the popular-content worker.
    pub popular_rx: mpsc::UnboundedReceiver<Vec<Item>>,
}

impl Channels {
    /// What: Create all channels and spawn the background workers.
    ///
    /// Inputs:
    /// - `service`: Remote search service shared by both workers
    /// - `settings`: Debounce, delay and pagination options
    /// - `intent_rx`: Receiver of UI intents
    /// - `output_tx`: Sender of session outputs
    ///
    /// Output:
    /// - Returns a `Channels` struct; the workers stop once it is dropped
    pub fn new(
        service: &Arc<dyn SearchService>,
        settings: &Settings,
        intent_rx: mpsc::UnboundedReceiver<Intent>,
        output_tx: mpsc::UnboundedSender<SessionOutput>,
    ) -> Self {
        let (page_req_tx, page_req_rx) = mpsc::unbounded_channel::<PageRequest<SearchParams>>();
        let (page_update_tx, page_update_rx) =
            mpsc::unbounded_channel::<PageUpdate<SearchParams, Item>>();
        let (popular_trigger_tx, popular_trigger_rx) = mpsc::unbounded_channel::<()>();
        let (popular_tx, popular_rx) = mpsc::unbounded_channel::<Vec<Item>>();

        // Spawn background workers
        super::workers::pagination::spawn_pagination_worker(
            Arc::new(SearchPages::new(Arc::clone(service))),
            PaginationOptions {
                clear_on_new_request: settings.clear_on_new_request,
                debounce: settings.debounce(),
                skip_repeats: settings.skip_repeat_searches,
            },
            page_req_rx,
            page_update_tx,
        );
        super::workers::popular::spawn_popular_worker(
            Arc::clone(service),
            settings.popular_delay(),
            popular_trigger_rx,
            popular_tx,
        );

        Self {
            intent_rx,
            output_tx,
            page_req_tx,
            page_update_rx,
            popular_trigger_tx,
            popular_rx,
        }
    }
}
