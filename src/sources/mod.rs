//! Remote search service boundary.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::logic::PageSource;
use crate::state::{Cursor, Page, SearchParams};

mod search;

pub use search::HttpSearchService;

/// Result alias for fallible collaborator calls.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Paginated search endpoint consumed by the session.
pub trait SearchService: Send + Sync {
    /// What: Fetch the first page for `params`.
    fn fetch_page(&self, params: SearchParams) -> BoxFuture<'static, Result<Page>>;

    /// What: Fetch the page named by `cursor`.
    fn fetch_page_at(&self, cursor: Cursor) -> BoxFuture<'static, Result<Page>>;
}

/// What: Adapts a [`SearchService`] to the generic pagination worker.
#[derive(Clone)]
pub struct SearchPages {
    /// Underlying service.
    service: Arc<dyn SearchService>,
}

impl SearchPages {
    /// What: Wrap a shared search service.
    #[must_use]
    pub fn new(service: Arc<dyn SearchService>) -> Self {
        Self { service }
    }
}

impl PageSource for SearchPages {
    type Params = SearchParams;
    type Page = Page;

    fn first_page(&self, params: SearchParams) -> BoxFuture<'static, Result<Page>> {
        self.service.fetch_page(params)
    }

    fn next_page(&self, cursor: Cursor) -> BoxFuture<'static, Result<Page>> {
        self.service.fetch_page_at(cursor)
    }
}
