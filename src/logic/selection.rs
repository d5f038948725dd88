//! Tap handling: pairs a selection with the list it was made in.

use crate::state::{Item, Navigation, Provenance};

/// What: Pair a tapped item with the display list current at tap time.
///
/// Inputs:
/// - `item`: Tapped item.
/// - `displayed`: Most recent display list, `None` when nothing was displayed yet.
///
/// Output:
/// - `Some(Navigation)` tagged as coming from search; `None` without a display list.
#[must_use]
pub fn navigation_for_tap(item: Item, displayed: Option<&[Item]>) -> Option<Navigation> {
    displayed.map(|list| Navigation {
        item,
        list: list.to_vec(),
        provenance: Provenance::Search,
    })
}
