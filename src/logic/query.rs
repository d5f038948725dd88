//! Query coalescing: collapses raw intents into the canonical query stream.

use crate::state::{FocusState, Intent};

/// Everything a single intent contributes to the derived signals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Coalesced {
    /// New query value, if this intent produces one.
    pub query: Option<String>,
    /// Focus change, if any.
    pub focus: Option<FocusState>,
    /// Whether the search field should resign focus.
    pub resign_focus: bool,
    /// Whether the search field text must be reset to empty.
    pub reset_field: bool,
    /// Set exactly once, on the first non-animated appearance.
    pub first_appearance: bool,
    /// Set when the user explicitly cleared the search (cancel or clear).
    pub cleared: bool,
}

/// What: Merges text/cancel/clear/appear intents into one query stream.
///
/// Details:
/// - No debouncing here; typed text passes through verbatim, including `""`.
/// - Only the first `ViewAppeared { animated: false }` emits the initial `""`.
/// - `EditingEnded` never touches the query.
#[derive(Clone, Debug, Default)]
pub struct QueryCoalescer {
    /// Whether the first non-animated appearance has been seen.
    appeared: bool,
}

impl QueryCoalescer {
    /// What: Create a coalescer that has not yet seen an appearance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Fold one intent into its derived signals.
    ///
    /// Inputs:
    /// - `intent`: Raw intent from the UI boundary.
    ///
    /// Output:
    /// - `Coalesced` describing the query/focus effects of `intent`.
    ///
    /// Details:
    /// - Row visibility and taps are not query events and yield `Coalesced::default()`.
    pub fn coalesce(&mut self, intent: &Intent) -> Coalesced {
        match intent {
            Intent::ViewAppeared { animated: false } if !self.appeared => {
                self.appeared = true;
                Coalesced {
                    query: Some(String::new()),
                    focus: Some(FocusState {
                        focused: false,
                        animate: false,
                    }),
                    first_appearance: true,
                    ..Coalesced::default()
                }
            }
            Intent::CancelPressed => Coalesced {
                query: Some(String::new()),
                focus: Some(FocusState {
                    focused: false,
                    animate: true,
                }),
                resign_focus: true,
                reset_field: true,
                cleared: true,
                ..Coalesced::default()
            },
            Intent::ClearPressed => Coalesced {
                query: Some(String::new()),
                reset_field: true,
                cleared: true,
                ..Coalesced::default()
            },
            Intent::TextChanged(text) => Coalesced {
                query: Some(text.clone()),
                ..Coalesced::default()
            },
            Intent::BeginEditing => Coalesced {
                focus: Some(FocusState {
                    focused: true,
                    animate: true,
                }),
                ..Coalesced::default()
            },
            Intent::EditingEnded => Coalesced {
                resign_focus: true,
                ..Coalesced::default()
            },
            Intent::ViewAppeared { .. } | Intent::RowVisible { .. } | Intent::ItemTapped(_) => {
                Coalesced::default()
            }
        }
    }
}
