//! Chooses between the popular list and search results, suppressing repeats.

/// Signals produced by one composer input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewUpdate<T> {
    /// New popular-visibility value, only when it changed.
    pub popular_visible: Option<bool>,
    /// New display list, only when it differs from the last one emitted.
    pub display: Option<Vec<T>>,
}

impl<T> Default for ViewUpdate<T> {
    fn default() -> Self {
        Self {
            popular_visible: None,
            display: None,
        }
    }
}

/// What: Holds the latest query, popular list and search list and derives the display list.
///
/// Details:
/// - Nothing is displayed until both a query and the popular list have arrived.
/// - Every query change injects an empty search list so stale results never flash.
#[derive(Clone, Debug)]
pub struct ViewComposer<T> {
    /// Latest query.
    query: Option<String>,
    /// Latest popular list.
    popular: Option<Vec<T>>,
    /// Latest search results (cleared on every query change).
    search: Vec<T>,
    /// Last emitted visibility.
    popular_visible: Option<bool>,
    /// Last emitted display list.
    displayed: Option<Vec<T>>,
}

impl<T> Default for ViewComposer<T> {
    fn default() -> Self {
        Self {
            query: None,
            popular: None,
            search: Vec::new(),
            popular_visible: None,
            displayed: None,
        }
    }
}

impl<T: Clone + PartialEq> ViewComposer<T> {
    /// What: Create an empty composer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Record a query change.
    ///
    /// Inputs:
    /// - `query`: New query value.
    ///
    /// Output:
    /// - Visibility and display changes caused by the query.
    pub fn query_changed(&mut self, query: &str) -> ViewUpdate<T> {
        self.query = Some(query.to_string());
        self.search.clear();
        let visible = query.is_empty();
        let popular_visible = if self.popular_visible == Some(visible) {
            None
        } else {
            self.popular_visible = Some(visible);
            Some(visible)
        };
        ViewUpdate {
            popular_visible,
            display: self.recompose(),
        }
    }

    /// What: Record the popular list.
    pub fn popular_loaded(&mut self, items: Vec<T>) -> ViewUpdate<T> {
        self.popular = Some(items);
        ViewUpdate {
            popular_visible: None,
            display: self.recompose(),
        }
    }

    /// What: Record the latest accumulated search results.
    pub fn search_results(&mut self, items: Vec<T>) -> ViewUpdate<T> {
        self.search = items;
        ViewUpdate {
            popular_visible: None,
            display: self.recompose(),
        }
    }

    /// What: Last display list emitted, if any.
    #[must_use]
    pub fn displayed(&self) -> Option<&[T]> {
        self.displayed.as_deref()
    }

    /// What: Whether the popular list is authoritative for the current query.
    #[must_use]
    pub fn is_popular_visible(&self) -> bool {
        self.query.as_deref().is_none_or(str::is_empty)
    }

    /// What: Derive the display list and emit it only when it changed.
    fn recompose(&mut self) -> Option<Vec<T>> {
        let query = self.query.as_deref()?;
        let popular = self.popular.as_ref()?;
        let next = if query.is_empty() {
            popular
        } else {
            &self.search
        };
        if self.displayed.as_ref() == Some(next) {
            return None;
        }
        let next = next.clone();
        self.displayed = Some(next.clone());
        Some(next)
    }
}
