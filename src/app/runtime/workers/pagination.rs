use std::sync::Arc;

use tokio::{
    select,
    sync::mpsc,
    task::JoinHandle,
    time::{Duration, Instant, sleep_until},
};

use crate::logic::{PageEvent, PageSnapshot, PageSource, Paged, Pager};

/// Item type accumulated for source `S`.
type ItemOf<S> = <<S as PageSource>::Page as Paged>::Item;
/// Cursor type for source `S`.
type CursorOf<S> = <<S as PageSource>::Page as Paged>::Cursor;

/// Request sent to the pagination worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageRequest<P> {
    /// Start a brand-new search with these params.
    NewSearch {
        /// Caller-assigned search id, echoed in every update of this search.
        id: u64,
        /// Params of the search.
        params: P,
    },
    /// Load one more page of the current search.
    NextPage,
}

/// Snapshot tagged with the search it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageUpdate<P, T> {
    /// Id the caller assigned to the search.
    pub id: u64,
    /// Params of the current search.
    pub params: P,
    /// State projection after the transition.
    pub snapshot: PageSnapshot<T>,
}

/// Tuning for the pagination worker.
#[derive(Clone, Copy, Debug)]
pub struct PaginationOptions {
    /// Reset accumulated items as soon as a new search starts.
    pub clear_on_new_request: bool,
    /// Quiet period before a first-page request is issued.
    pub debounce: Duration,
    /// Ignore a new search whose params equal the previous one.
    pub skip_repeats: bool,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            clear_on_new_request: true,
            debounce: Duration::from_millis(300),
            skip_repeats: false,
        }
    }
}

/// First-page request waiting out its debounce window.
struct PendingFirstPage<P> {
    /// Generation the request belongs to.
    generation: u64,
    /// Params to fetch with.
    params: P,
    /// When the debounce window closes.
    deadline: Instant,
}

/// What: Spawn the worker that owns the pagination state for one session.
///
/// Inputs:
/// - `source`: Remote page source.
/// - `options`: Debounce and clearing behaviour.
/// - `req_rx`: Channel receiver for new-search and next-page requests.
/// - `update_tx`: Channel sender for `(items, isLoading, pageNumber)` snapshots,
///   tagged with the id and params of the current search.
///
/// Output:
/// - Handle of the worker task; it ends when `req_rx` closes.
///
/// Details:
/// - A new search starts a fresh generation, emits a loading snapshot at once,
///   and issues the fetch only after `debounce` without another new search.
/// - Superseding a search drops the pending debounce and aborts the in-flight
///   fetch; a response that still arrives is rejected by its generation.
/// - A skipped repeat search adopts the new id and republishes the current snapshot.
/// - Next-page requests fetch immediately and are no-ops while loading or
///   once the cursor is exhausted.
pub fn spawn_pagination_worker<S: PageSource>(
    source: Arc<S>,
    options: PaginationOptions,
    mut req_rx: mpsc::UnboundedReceiver<PageRequest<S::Params>>,
    update_tx: mpsc::UnboundedSender<PageUpdate<S::Params, ItemOf<S>>>,
) -> JoinHandle<()>
where
    ItemOf<S>: Clone + Send + 'static,
    CursorOf<S>: Clone + Send + 'static,
{
    tokio::spawn(async move {
        let (event_tx, mut event_rx) =
            mpsc::unbounded_channel::<PageEvent<ItemOf<S>, CursorOf<S>>>();
        let mut pager: Pager<ItemOf<S>, CursorOf<S>> = Pager::new(options.clear_on_new_request);
        let mut pending: Option<PendingFirstPage<S::Params>> = None;
        let mut in_flight: Option<JoinHandle<()>> = None;
        let mut last_params: Option<S::Params> = None;
        let mut search_id: u64 = 0;
        let publish = |id: u64,
                       params: Option<&S::Params>,
                       pager: &Pager<ItemOf<S>, CursorOf<S>>| {
            if let Some(params) = params {
                let _ = update_tx.send(PageUpdate {
                    id,
                    params: params.clone(),
                    snapshot: pager.snapshot(),
                });
            }
        };
        loop {
            let deadline = pending
                .as_ref()
                .map_or_else(Instant::now, |p| p.deadline);
            select! {
                req = req_rx.recv() => {
                    let Some(req) = req else {
                        break;
                    };
                    match req {
                        PageRequest::NewSearch { id, params } => {
                            search_id = id;
                            if options.skip_repeats && last_params.as_ref() == Some(&params) {
                                tracing::debug!(id, ?params, "skipping repeated search");
                                publish(search_id, last_params.as_ref(), &pager);
                                continue;
                            }
                            if let Some(handle) = in_flight.take() {
                                handle.abort();
                            }
                            let generation = pager.start_new_search();
                            if let Some(old) = pending.take() {
                                tracing::debug!(
                                    superseded = old.generation,
                                    generation,
                                    "debounced search superseded"
                                );
                            }
                            last_params = Some(params.clone());
                            pending = Some(PendingFirstPage {
                                generation,
                                params,
                                deadline: Instant::now() + options.debounce,
                            });
                            publish(search_id, last_params.as_ref(), &pager);
                        }
                        PageRequest::NextPage => {
                            let Some((generation, cursor)) = pager.begin_next_page() else {
                                tracing::trace!("next page ignored (loading or exhausted)");
                                continue;
                            };
                            tracing::debug!(generation, "fetching next page");
                            in_flight = Some(spawn_next_page(&source, generation, cursor, &event_tx));
                            publish(search_id, last_params.as_ref(), &pager);
                        }
                    }
                }
                () = sleep_until(deadline), if pending.is_some() => {
                    if let Some(first) = pending.take() {
                        tracing::debug!(generation = first.generation, params = ?first.params, "fetching first page");
                        in_flight = Some(spawn_first_page(&source, first.generation, first.params, &event_tx));
                    }
                }
                Some(event) = event_rx.recv() => {
                    let generation = event.generation();
                    if pager.apply(event) {
                        in_flight = None;
                        publish(search_id, last_params.as_ref(), &pager);
                    } else {
                        tracing::debug!(generation, current = pager.generation(), "dropping stale page response");
                    }
                }
            }
        }
        if let Some(handle) = in_flight {
            handle.abort();
        }
    })
}

/// What: Fetch a first page in the background and report it as a `PageEvent`.
fn spawn_first_page<S: PageSource>(
    source: &Arc<S>,
    generation: u64,
    params: S::Params,
    event_tx: &mpsc::UnboundedSender<PageEvent<ItemOf<S>, CursorOf<S>>>,
) -> JoinHandle<()>
where
    ItemOf<S>: Send + 'static,
    CursorOf<S>: Send + 'static,
{
    let fut = source.first_page(params);
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let event = match fut.await {
            Ok(page) => {
                let (items, cursor) = page.into_parts();
                PageEvent::FirstPageLoaded {
                    generation,
                    items,
                    cursor,
                }
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, "first page fetch failed");
                PageEvent::FetchFailed { generation }
            }
        };
        let _ = tx.send(event);
    })
}

/// What: Fetch a continuation page in the background and report it as a `PageEvent`.
fn spawn_next_page<S: PageSource>(
    source: &Arc<S>,
    generation: u64,
    cursor: CursorOf<S>,
    event_tx: &mpsc::UnboundedSender<PageEvent<ItemOf<S>, CursorOf<S>>>,
) -> JoinHandle<()>
where
    ItemOf<S>: Send + 'static,
    CursorOf<S>: Send + 'static,
{
    let fut = source.next_page(cursor);
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let event = match fut.await {
            Ok(page) => {
                let (items, cursor) = page.into_parts();
                PageEvent::NextPageLoaded {
                    generation,
                    items,
                    cursor,
                }
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, "next page fetch failed");
                PageEvent::FetchFailed { generation }
            }
        };
        let _ = tx.send(event);
    })
}
