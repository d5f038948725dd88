//! Edge-triggered "near bottom" detection from row visibility notifications.

/// Default distance from the last row that counts as near the bottom.
pub const DEFAULT_ROWS_FROM_BOTTOM: usize = 3;

/// What: Converts `(row, total)` visibility notifications into rising-edge events.
///
/// Details:
/// - Predicate: `row >= total - rows_from_bottom` (saturating).
/// - Consecutive `true` evaluations fire only once; a `false` re-arms it.
#[derive(Clone, Debug)]
pub struct ScrollThreshold {
    /// Distance from the end that triggers loading.
    rows_from_bottom: usize,
    /// Last predicate value.
    near: bool,
}

impl Default for ScrollThreshold {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS_FROM_BOTTOM)
    }
}

impl ScrollThreshold {
    /// What: Create a detector with a custom threshold.
    ///
    /// Inputs:
    /// - `rows_from_bottom`: How many rows before the end count as near the bottom.
    #[must_use]
    pub const fn new(rows_from_bottom: usize) -> Self {
        Self {
            rows_from_bottom,
            near: false,
        }
    }

    /// What: Feed one visibility notification.
    ///
    /// Inputs:
    /// - `row`: Visible row index.
    /// - `total`: Number of rows in the list.
    ///
    /// Output:
    /// - `true` only on the transition into the near-bottom region.
    pub fn observe(&mut self, row: usize, total: usize) -> bool {
        let near = row >= total.saturating_sub(self.rows_from_bottom);
        let fired = near && !self.near;
        self.near = near;
        fired
    }

    /// What: Re-arm the detector, e.g. when a new result list replaces the old one.
    pub const fn reset(&mut self) {
        self.near = false;
    }
}
