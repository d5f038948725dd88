use std::sync::Arc;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Duration, sleep},
};

use crate::sources::SearchService;
use crate::state::{Item, SearchParams};

/// What: Spawn background worker for the popular/trending list.
///
/// Inputs:
/// - `service`: Remote search service.
/// - `delay`: Artificial delay applied before the list is delivered.
/// - `trigger_rx`: Channel receiver; each message (re)starts a fetch.
/// - `popular_tx`: Channel sender for the fetched list.
///
/// Output:
/// - Handle of the worker task; it ends when `trigger_rx` closes.
///
/// Details:
/// - Fetches page 1 with `sort=popular` and an empty query.
/// - Latest trigger wins: a newer trigger aborts the fetch still in flight.
/// - Failures are demoted to an empty list and logged; they never reach the caller.
pub fn spawn_popular_worker(
    service: Arc<dyn SearchService>,
    delay: Duration,
    mut trigger_rx: mpsc::UnboundedReceiver<()>,
    popular_tx: mpsc::UnboundedSender<Vec<Item>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut in_flight: Option<JoinHandle<()>> = None;
        while trigger_rx.recv().await.is_some() {
            if let Some(handle) = in_flight.take() {
                tracing::debug!("popular fetch superseded");
                handle.abort();
            }
            let fut = service.fetch_page(SearchParams::popular());
            let tx = popular_tx.clone();
            in_flight = Some(tokio::spawn(async move {
                let items = match fut.await {
                    Ok(page) => page.items,
                    Err(e) => {
                        tracing::warn!(error = %e, "popular fetch failed; showing nothing");
                        Vec::new()
                    }
                };
                sleep(delay).await;
                let _ = tx.send(items);
            }));
        }
        if let Some(handle) = in_flight {
            handle.abort();
        }
    })
}
