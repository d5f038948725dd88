//! Session settings loaded from `settings.conf`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::state::SortOrder;

mod parse;
mod paths;

pub use parse::parse_settings;
pub use paths::logs_dir;

/// User-tunable session settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Search endpoint URL.
    pub endpoint: String,
    /// Quiet period before a first-page request is issued.
    pub debounce_ms: u64,
    /// Artificial delay applied to the popular-content result.
    pub popular_delay_ms: u64,
    /// Clear accumulated results as soon as a new search starts.
    pub clear_on_new_request: bool,
    /// Ignore a new search identical to the previous one.
    pub skip_repeat_searches: bool,
    /// Rows from the end that count as near the bottom.
    pub near_bottom_rows: usize,
    /// Sort order for search requests.
    pub search_sort: SortOrder,
    /// Per-request HTTP timeout.
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080/search".to_string(),
            debounce_ms: 300,
            popular_delay_ms: 0,
            clear_on_new_request: true,
            skip_repeat_searches: false,
            near_bottom_rows: crate::logic::scroll::DEFAULT_ROWS_FROM_BOTTOM,
            search_sort: SortOrder::Relevance,
            request_timeout_secs: 10,
        }
    }
}

impl Settings {
    /// What: Debounce window as a `Duration`.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// What: Popular-content delay as a `Duration`.
    #[must_use]
    pub const fn popular_delay(&self) -> Duration {
        Duration::from_millis(self.popular_delay_ms)
    }

    /// What: HTTP timeout as a `Duration`.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// What: Load settings from `path`, or from the default config location.
///
/// Inputs:
/// - `path`: Explicit settings file; `None` searches `XDG_CONFIG_HOME`/`HOME`.
///
/// Output:
/// - Parsed settings; `Settings::default()` when no file exists or it cannot be read.
#[must_use]
pub fn load_settings(path: Option<&Path>) -> Settings {
    let mut out = Settings::default();
    let resolved = path
        .map(Path::to_path_buf)
        .or_else(paths::resolve_settings_config_path);
    let Some(resolved) = resolved else {
        tracing::debug!("[Config] no settings file found; using defaults");
        return out;
    };
    match fs::read_to_string(&resolved) {
        Ok(content) => {
            parse_settings(&content, &mut out);
            tracing::info!(path = %resolved.display(), "[Config] settings loaded");
        }
        Err(e) => {
            tracing::warn!(path = %resolved.display(), error = %e, "[Config] failed to read settings; using defaults");
        }
    }
    out
}
