//! Cursor pagination state machine.
//!
//! `Pager` owns the accumulated items, the continuation cursor, the page
//! number, the loading flag and a generation counter. It never performs I/O:
//! the pagination worker asks it what to fetch and feeds responses back as
//! [`PageEvent`]s. Responses tagged with an outdated generation are dropped.

use futures::future::BoxFuture;

use crate::sources::Result;
use crate::state::{Cursor, Item, Page};

/// A page that can be split into its items and its continuation cursor.
pub trait Paged {
    /// Element type accumulated across pages.
    type Item;
    /// Continuation token type.
    type Cursor;

    /// What: Consume the page into `(items, cursor)`.
    ///
    /// Output:
    /// - Items in page order and the cursor of the following page, if any.
    fn into_parts(self) -> (Vec<Self::Item>, Option<Self::Cursor>);
}

impl Paged for Page {
    type Item = Item;
    type Cursor = Cursor;

    fn into_parts(self) -> (Vec<Item>, Option<Cursor>) {
        let cursor = self.cursor_of();
        (self.items, cursor)
    }
}

/// Remote collaborator that fetches first and continuation pages.
pub trait PageSource: Send + Sync + 'static {
    /// Params that start a new search.
    type Params: Clone + PartialEq + std::fmt::Debug + Send + 'static;
    /// Page type returned by both fetches.
    type Page: Paged + Send + 'static;

    /// What: Fetch page 1 for `params`.
    fn first_page(&self, params: Self::Params) -> BoxFuture<'static, Result<Self::Page>>;

    /// What: Fetch the page named by `cursor`.
    fn next_page(
        &self,
        cursor: <Self::Page as Paged>::Cursor,
    ) -> BoxFuture<'static, Result<Self::Page>>;
}

/// Projection of the pagination state visible to other components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSnapshot<T> {
    /// Accumulated items of the current search.
    pub items: Vec<T>,
    /// Whether a fetch of the current generation is pending.
    pub is_loading: bool,
    /// Pages applied so far for the current search (1 once a search starts).
    pub page_number: u32,
    /// Set only on the snapshot that follows a failed fetch.
    pub failed: bool,
}

/// Response fed back into the [`Pager`].
#[derive(Debug)]
pub enum PageEvent<T, C> {
    /// First page of `generation` arrived.
    FirstPageLoaded {
        /// Generation the request was issued under.
        generation: u64,
        /// Items of the page.
        items: Vec<T>,
        /// Continuation cursor.
        cursor: Option<C>,
    },
    /// A continuation page of `generation` arrived.
    NextPageLoaded {
        /// Generation the request was issued under.
        generation: u64,
        /// Items of the page.
        items: Vec<T>,
        /// Continuation cursor.
        cursor: Option<C>,
    },
    /// A fetch of `generation` failed.
    FetchFailed {
        /// Generation the request was issued under.
        generation: u64,
    },
}

impl<T, C> PageEvent<T, C> {
    /// What: Generation the event belongs to.
    pub const fn generation(&self) -> u64 {
        match self {
            Self::FirstPageLoaded { generation, .. }
            | Self::NextPageLoaded { generation, .. }
            | Self::FetchFailed { generation } => *generation,
        }
    }
}

/// What: Pagination state for one live request chain at a time.
///
/// Details:
/// - `generation` increments on every new search; older responses are ignored.
/// - At most one fetch per generation is outstanding; `begin_next_page` is a
///   no-op while loading or once the cursor is exhausted.
#[derive(Clone, Debug)]
pub struct Pager<T, C> {
    /// Accumulated items.
    items: Vec<T>,
    /// Cursor of the next page.
    cursor: Option<C>,
    /// Current page number.
    page_number: u32,
    /// Whether a fetch is outstanding.
    is_loading: bool,
    /// Current request chain.
    generation: u64,
    /// Whether to drop accumulated items as soon as a new search starts.
    clear_on_new_request: bool,
    /// Whether the last settled fetch failed.
    failed: bool,
}

impl<T: Clone, C: Clone> Pager<T, C> {
    /// What: Create an idle pager.
    ///
    /// Inputs:
    /// - `clear_on_new_request`: Reset items immediately when a new search starts.
    #[must_use]
    pub const fn new(clear_on_new_request: bool) -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
            page_number: 0,
            is_loading: false,
            generation: 0,
            clear_on_new_request,
            failed: false,
        }
    }

    /// What: Start a new request chain.
    ///
    /// Output:
    /// - The new generation the first-page fetch must be tagged with.
    ///
    /// Details:
    /// - Resets the cursor, sets page 1, marks loading, optionally clears items.
    pub fn start_new_search(&mut self) -> u64 {
        self.generation += 1;
        if self.clear_on_new_request {
            self.items.clear();
        }
        self.cursor = None;
        self.page_number = 1;
        self.is_loading = true;
        self.failed = false;
        self.generation
    }

    /// What: Claim the next page of the current search.
    ///
    /// Output:
    /// - `Some((generation, cursor))` when a continuation fetch must be issued;
    ///   `None` while loading or after exhaustion.
    pub fn begin_next_page(&mut self) -> Option<(u64, C)> {
        if self.is_loading {
            return None;
        }
        let cursor = self.cursor.clone()?;
        self.is_loading = true;
        self.failed = false;
        Some((self.generation, cursor))
    }

    /// What: Apply a fetch response.
    ///
    /// Inputs:
    /// - `event`: Response tagged with the generation it was issued under.
    ///
    /// Output:
    /// - `true` when the state changed, `false` for a stale response.
    pub fn apply(&mut self, event: PageEvent<T, C>) -> bool {
        if event.generation() != self.generation || !self.is_loading {
            return false;
        }
        match event {
            PageEvent::FirstPageLoaded { items, cursor, .. } => {
                self.items = items;
                self.cursor = cursor;
                self.page_number = 1;
            }
            PageEvent::NextPageLoaded { items, cursor, .. } => {
                self.items.extend(items);
                self.page_number += 1;
                self.cursor = cursor;
            }
            PageEvent::FetchFailed { .. } => {
                self.failed = true;
            }
        }
        self.is_loading = false;
        true
    }

    /// What: Project the externally visible state.
    #[must_use]
    pub fn snapshot(&self) -> PageSnapshot<T> {
        PageSnapshot {
            items: self.items.clone(),
            is_loading: self.is_loading,
            page_number: self.page_number,
            failed: self.failed,
        }
    }

    #[cfg(test)]
    /// What: Accumulated items.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[cfg(test)]
    /// What: Cursor of the next page, if any.
    #[must_use]
    pub const fn cursor(&self) -> Option<&C> {
        self.cursor.as_ref()
    }

    #[cfg(test)]
    /// What: Current page number (0 before the first search).
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    #[cfg(test)]
    /// What: Whether a fetch is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// What: Current generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
