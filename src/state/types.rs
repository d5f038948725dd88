//! Core value types shared by the coalescing components and the session runtime.

use serde::{Deserialize, Serialize};

/// Single search result as returned by the remote search service.
///
/// Compared by value; the display list de-duplication relies on this.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier assigned by the service.
    pub id: u64,
    /// Primary line of text shown in lists.
    pub title: String,
    /// Secondary line; empty when the service omits it.
    #[serde(default)]
    pub subtitle: String,
}

/// Opaque continuation token naming the next page of a result set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(pub String);

impl Cursor {
    /// What: Borrow the raw token.
    ///
    /// Output:
    /// - The token exactly as the service issued it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ordering requested from the remote search service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Trending first. Used by the popular-content fetch.
    Popular,
    /// Best textual match first.
    #[default]
    Relevance,
    /// Most recently created first.
    Newest,
}

impl SortOrder {
    /// What: Wire/config name of the sort order.
    ///
    /// Output:
    /// - Lowercase key such as `"popular"`.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Relevance => "relevance",
            Self::Newest => "newest",
        }
    }

    /// What: Parse a sort order from a config value.
    ///
    /// Inputs:
    /// - `s`: Config value, case-insensitive.
    ///
    /// Output:
    /// - `Some(SortOrder)` for a known key, `None` otherwise.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popular" | "trending" => Some(Self::Popular),
            "relevance" | "best" | "best_matches" => Some(Self::Relevance),
            "newest" | "recent" => Some(Self::Newest),
            _ => None,
        }
    }
}

/// Parameters of one remote search request.
///
/// Built fresh per request from a template plus the current query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Query text; empty only for the popular-content request.
    pub query: String,
    /// Requested ordering.
    pub sort: SortOrder,
}

impl SearchParams {
    /// What: Derive request params for `query` from this template.
    ///
    /// Inputs:
    /// - `query`: Current query text.
    ///
    /// Output:
    /// - A new `SearchParams` with the template's sort and the given query.
    #[must_use]
    pub fn with_query(&self, query: &str) -> Self {
        Self {
            query: query.to_string(),
            sort: self.sort,
        }
    }

    /// What: Params for the trending/default list.
    #[must_use]
    pub fn popular() -> Self {
        Self {
            query: String::new(),
            sort: SortOrder::Popular,
        }
    }
}

/// One page of results as delivered by the remote search service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Items in service order.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Continuation token; `None` once the result set is exhausted.
    #[serde(default)]
    pub next_cursor: Option<Cursor>,
    /// 1-based page number as reported by the service.
    #[serde(default = "first_page_number", rename = "page")]
    pub page_number: u32,
}

/// Serde default for [`Page::page_number`].
const fn first_page_number() -> u32 {
    1
}

impl Page {
    /// What: Continuation cursor, treating a blank token as exhaustion.
    ///
    /// Output:
    /// - `Some(cursor)` when another page exists, `None` otherwise.
    #[must_use]
    pub fn cursor_of(&self) -> Option<Cursor> {
        self.next_cursor
            .as_ref()
            .filter(|c| !c.as_str().trim().is_empty())
            .cloned()
    }
}

/// Focus instruction for the search text field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FocusState {
    /// Whether the field should hold keyboard focus.
    pub focused: bool,
    /// Whether the change should be animated.
    pub animate: bool,
}

/// Raw user intent delivered by the UI boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Search field text changed; carries the full new text.
    TextChanged(String),
    /// Cancel button pressed.
    CancelPressed,
    /// Clear button inside the search field pressed.
    ClearPressed,
    /// The search screen appeared.
    ViewAppeared {
        /// Whether the appearance was animated.
        animated: bool,
    },
    /// The search field started editing.
    BeginEditing,
    /// The search field stopped editing.
    EditingEnded,
    /// Row `row` of a list with `total` rows became visible.
    RowVisible {
        /// 0-based row index.
        row: usize,
        /// Number of rows in the list.
        total: usize,
    },
    /// A displayed item was tapped.
    ItemTapped(Item),
}

/// Where a navigation request originated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Tapped from the search screen.
    Search,
}

impl Provenance {
    /// What: Tag string handed to downstream navigation.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Search => "search",
        }
    }
}

/// Navigation request pairing a tapped item with the list it was tapped in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Tapped item.
    pub item: Item,
    /// Display list current at tap time; becomes the next screen's context.
    pub list: Vec<Item>,
    /// Origin of the navigation.
    pub provenance: Provenance,
}

/// Output signal delivered to the UI boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SessionOutput {
    /// List to display; consecutive duplicates are never emitted.
    DisplayList(Vec<Item>),
    /// Whether the popular list (and its title) is visible.
    PopularVisible(bool),
    /// Search field focus change.
    Focus(FocusState),
    /// The search field should resign focus.
    ResignFocus,
    /// Replace the search field text.
    SearchFieldText(String),
    /// Whether a search page is loading.
    Loading(bool),
    /// Show or hide the "no results" state for `query`.
    EmptyState {
        /// Query the state refers to.
        query: String,
        /// Whether the empty state is shown.
        visible: bool,
    },
    /// Navigate to a detail view.
    Navigate(Navigation),
}
