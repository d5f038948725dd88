//! Fire-and-forget analytics notifications observed from the session.

use std::sync::Mutex;

/// Analytics notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnalyticsEvent {
    /// The search screen appeared for the first time.
    ViewAppeared,
    /// A page of search results was applied.
    ResultsShown {
        /// Query the results belong to.
        query: String,
        /// Page number now displayed.
        page: u32,
        /// Whether the accumulated list is non-empty.
        has_results: bool,
    },
    /// The user cancelled or cleared the search.
    SearchCleared,
}

/// Receiver of analytics notifications. Never affects control flow.
pub trait AnalyticsSink: Send + Sync {
    /// What: Record one event.
    fn track(&self, event: AnalyticsEvent);
}

/// What: Sink that records events through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        match event {
            AnalyticsEvent::ViewAppeared => tracing::info!(target: "analytics", "search view appeared"),
            AnalyticsEvent::ResultsShown {
                query,
                page,
                has_results,
            } => tracing::info!(
                target: "analytics",
                query = %query,
                page,
                has_results,
                "search results shown"
            ),
            AnalyticsEvent::SearchCleared => tracing::info!(target: "analytics", "search cleared"),
        }
    }
}

/// What: Sink that keeps every event in memory, for tests and embedding hosts.
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    /// Events in arrival order.
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingAnalytics {
    /// What: Copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
