use crate::state::SortOrder;
use crate::util::config::{parse_bool, parse_key_value, skip_comment_or_empty};

use super::Settings;

/// What: Parse `settings.conf` content into `settings`.
///
/// Inputs:
/// - `content`: File content.
/// - `settings`: Settings to update in place.
///
/// Output:
/// - None (modifies `settings` in-place).
///
/// Details:
/// - Unknown keys and unparsable values are logged and ignored, keeping the previous value.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((key, val)) = parse_key_value(line) else {
            continue;
        };
        let applied = match key.as_str() {
            "endpoint" | "search_endpoint" => {
                if !val.is_empty() {
                    settings.endpoint.clone_from(&val);
                }
                !val.is_empty()
            }
            "debounce_ms" => val.parse::<u64>().map(|v| settings.debounce_ms = v).is_ok(),
            "popular_delay_ms" | "api_delay_ms" => {
                val.parse::<u64>().map(|v| settings.popular_delay_ms = v).is_ok()
            }
            "clear_on_new_request" => parse_bool(&val)
                .map(|v| settings.clear_on_new_request = v)
                .is_some(),
            "skip_repeat_searches" => parse_bool(&val)
                .map(|v| settings.skip_repeat_searches = v)
                .is_some(),
            "near_bottom_rows" => val.parse::<usize>().map(|v| settings.near_bottom_rows = v).is_ok(),
            "search_sort" | "sort" => SortOrder::from_config_key(&val)
                .map(|v| settings.search_sort = v)
                .is_some(),
            "request_timeout_secs" => val
                .parse::<u64>()
                .ok()
                .filter(|v| *v > 0)
                .map(|v| settings.request_timeout_secs = v)
                .is_some(),
            _ => {
                tracing::debug!(key = %key, "[Config] ignoring unknown settings key");
                continue;
            }
        };
        if !applied {
            tracing::warn!(key = %key, value = %val, "[Config] ignoring invalid settings value");
        }
    }
}
