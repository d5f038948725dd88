//! Per-session component state owned by the session loop.

use crate::logic::{QueryCoalescer, ScrollThreshold, ViewComposer};
use crate::settings::Settings;
use crate::state::{Item, SearchParams};

/// Everything the session loop mutates; lives on the session task only.
#[derive(Clone, Debug)]
pub struct SessionState {
    /// Raw intent to query coalescing.
    pub coalescer: QueryCoalescer,
    /// Near-bottom edge detector.
    pub scroll: ScrollThreshold,
    /// Popular vs. search display composition.
    pub view: ViewComposer<Item>,
    /// Current query.
    pub query: String,
    /// Id of the latest search; bumped on every query change.
    pub latest_search_id: u64,
    /// Template search requests are derived from.
    pub search_template: SearchParams,
    /// Last emitted loading flag.
    pub loading: bool,
    /// Last emitted empty-state `(query, visible)`.
    pub empty_state: Option<(String, bool)>,
}

impl SessionState {
    /// What: Fresh session state for `settings`.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            coalescer: QueryCoalescer::new(),
            scroll: ScrollThreshold::new(settings.near_bottom_rows),
            view: ViewComposer::new(),
            query: String::new(),
            latest_search_id: 0,
            search_template: SearchParams {
                query: String::new(),
                sort: settings.search_sort,
            },
            loading: false,
            empty_state: None,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
