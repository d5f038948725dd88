use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::{Result, SearchService};
use crate::state::{Cursor, Page, SearchParams};
use crate::util::percent_encode;

/// What: `SearchService` backed by a JSON HTTP endpoint.
///
/// Details:
/// - First page: `GET {endpoint}?q=<query>&sort=<sort>`.
/// - Continuation: `GET {endpoint}?cursor=<token>`.
/// - Body: `{ "items": [...], "next_cursor": string|null, "page": int }`.
#[derive(Clone, Debug)]
pub struct HttpSearchService {
    /// Shared client with connection pooling.
    client: reqwest::Client,
    /// Search endpoint URL.
    endpoint: String,
}

impl HttpSearchService {
    /// What: Build a service for `endpoint`.
    ///
    /// Inputs:
    /// - `endpoint`: Search URL without query string.
    /// - `timeout`: Per-request timeout.
    ///
    /// Output:
    /// - `Ok(HttpSearchService)`; `Err` when the HTTP client cannot be created.
    ///
    /// # Errors
    /// - Returns `Err` when the TLS backend fails to initialize.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(format!("pagesift/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {e}"))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// What: Build `{endpoint}?k=v&...` with percent-encoded values.
    fn page_url(&self, query: &[(&str, &str)]) -> String {
        let qs = query
            .iter()
            .map(|(k, v)| format!("{k}={}", percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let sep = if self.endpoint.contains('?') { '&' } else { '?' };
        format!("{}{sep}{qs}", self.endpoint)
    }

    /// What: Issue a GET for `url` and decode the page.
    async fn get_page(client: reqwest::Client, url: String) -> Result<Page> {
        tracing::debug!(url = %url, "fetching search page");
        let resp = client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {e}"))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(format!("search endpoint returned HTTP {status}").into());
        }
        let page = resp
            .json::<Page>()
            .await
            .map_err(|e| format!("Failed to decode search page: {e}"))?;
        tracing::debug!(
            items = page.items.len(),
            has_next = page.cursor_of().is_some(),
            "search page received"
        );
        Ok(page)
    }
}

impl SearchService for HttpSearchService {
    fn fetch_page(&self, params: SearchParams) -> BoxFuture<'static, Result<Page>> {
        let url = self.page_url(&[
            ("q", params.query.as_str()),
            ("sort", params.sort.as_config_key()),
        ]);
        Self::get_page(self.client.clone(), url).boxed()
    }

    fn fetch_page_at(&self, cursor: Cursor) -> BoxFuture<'static, Result<Page>> {
        let url = self.page_url(&[("cursor", cursor.as_str())]);
        Self::get_page(self.client.clone(), url).boxed()
    }
}

#[cfg(test)]
mod tests {
    use crate::state::{Cursor, Item, Page};

    #[test]
    /// What: Service JSON decodes into a `Page`, with defaults for omitted fields.
    ///
    /// Inputs:
    /// - Full body with cursor, and a minimal body with only items.
    ///
    /// Output:
    /// - Cursor and page number parsed; missing ones default to `None` and `1`.
    fn decodes_page_bodies() {
        let full: Page = serde_json::from_str(
            r#"{"items":[{"id":1,"title":"Robots","subtitle":"kit"}],"next_cursor":"c1","page":3}"#,
        )
        .expect("full body");
        assert_eq!(
            full.items,
            vec![Item {
                id: 1,
                title: "Robots".into(),
                subtitle: "kit".into()
            }]
        );
        assert_eq!(full.cursor_of(), Some(Cursor("c1".into())));
        assert_eq!(full.page_number, 3);

        let minimal: Page =
            serde_json::from_str(r#"{"items":[{"id":2,"title":"Drones"}],"next_cursor":null}"#)
                .expect("minimal body");
        assert!(minimal.cursor_of().is_none());
        assert_eq!(minimal.page_number, 1);
        assert_eq!(minimal.items[0].subtitle, "");
    }

    #[test]
    /// What: Request URLs carry percent-encoded params and respect an existing query string.
    ///
    /// Inputs:
    /// - Plain endpoint with query `"3d printer"`; endpoint already holding `?api=1`.
    ///
    /// Output:
    /// - `?q=3d%20printer&sort=relevance` and `&cursor=c%2F1` respectively.
    fn builds_page_urls() {
        let timeout = std::time::Duration::from_secs(1);
        let svc = super::HttpSearchService::new("http://127.0.0.1:9/search", timeout)
            .expect("client");
        assert_eq!(
            svc.page_url(&[("q", "3d printer"), ("sort", "relevance")]),
            "http://127.0.0.1:9/search?q=3d%20printer&sort=relevance"
        );
        let svc = super::HttpSearchService::new("http://127.0.0.1:9/search?api=1", timeout)
            .expect("client");
        assert_eq!(
            svc.page_url(&[("cursor", "c/1")]),
            "http://127.0.0.1:9/search?api=1&cursor=c%2F1"
        );
    }
}
