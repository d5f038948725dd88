//! End-to-end session tests against a scripted search service on a virtual clock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::mpsc;

use pagesift::analytics::{AnalyticsEvent, RecordingAnalytics};
use pagesift::app::{SessionHandle, spawn_session};
use pagesift::settings::Settings;
use pagesift::sources::{Result, SearchService};
use pagesift::state::{
    Cursor, FocusState, Intent, Item, Page, Provenance, SearchParams, SessionOutput, SortOrder,
};

/// What: Build a test item.
fn item(id: u64, title: &str) -> Item {
    Item {
        id,
        title: title.to_string(),
        subtitle: String::new(),
    }
}

/// What: Build a page with an optional cursor.
fn page(items: Vec<Item>, cursor: Option<&str>) -> Page {
    Page {
        items,
        next_cursor: cursor.map(|c| Cursor(c.to_string())),
        page_number: 1,
    }
}

/// Scripted search service recording every request.
#[derive(Default)]
struct ScriptedService {
    /// Popular page (empty query).
    popular: Option<Page>,
    /// First pages keyed by query.
    first: HashMap<String, Page>,
    /// Continuation pages keyed by cursor.
    next: HashMap<String, Page>,
    /// Request log: `popular`, `first:<q>`, `next:<cursor>`.
    calls: Mutex<Vec<String>>,
}

impl ScriptedService {
    /// What: Copy of the request log.
    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// What: Log a request.
    fn log(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

impl SearchService for ScriptedService {
    fn fetch_page(&self, params: SearchParams) -> BoxFuture<'static, Result<Page>> {
        let found = if params.sort == SortOrder::Popular && params.query.is_empty() {
            self.log("popular".to_string());
            self.popular.clone()
        } else {
            self.log(format!("first:{}", params.query));
            self.first.get(&params.query).cloned()
        };
        async move {
            let page: Result<Page> = found.ok_or_else(|| "not scripted".into());
            page
        }
        .boxed()
    }

    fn fetch_page_at(&self, cursor: Cursor) -> BoxFuture<'static, Result<Page>> {
        self.log(format!("next:{}", cursor.as_str()));
        let found = self.next.get(cursor.as_str()).cloned();
        async move {
            let page: Result<Page> = found.ok_or_else(|| "not scripted".into());
            page
        }
        .boxed()
    }
}

/// Running session plus its collaborators.
struct Harness {
    /// Session handle.
    session: SessionHandle,
    /// Scripted service.
    service: Arc<ScriptedService>,
    /// Recorded analytics.
    analytics: Arc<RecordingAnalytics>,
}

impl Harness {
    /// What: Start a session over `service` with a 300ms debounce.
    fn start(service: ScriptedService) -> Self {
        let service = Arc::new(service);
        let analytics = Arc::new(RecordingAnalytics::default());
        let settings = Settings {
            debounce_ms: 300,
            ..Settings::default()
        };
        let session = spawn_session(service.clone(), analytics.clone(), &settings);
        Self {
            session,
            service,
            analytics,
        }
    }

    /// What: Send one intent.
    fn send(&self, intent: Intent) {
        self.session.intents.send(intent).expect("session alive");
    }

    /// What: Let the virtual clock run `ms` and drain the queued outputs.
    async fn settle(&mut self, ms: u64) -> Vec<SessionOutput> {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        drain(&mut self.session.outputs)
    }
}

/// What: Drain every output currently queued.
fn drain(rx: &mut mpsc::UnboundedReceiver<SessionOutput>) -> Vec<SessionOutput> {
    let mut out = Vec::new();
    while let Ok(o) = rx.try_recv() {
        out.push(o);
    }
    out
}

/// What: Only the display lists among `outputs`.
fn display_lists(outputs: &[SessionOutput]) -> Vec<Vec<Item>> {
    outputs
        .iter()
        .filter_map(|o| match o {
            SessionOutput::DisplayList(l) => Some(l.clone()),
            _ => None,
        })
        .collect()
}

/// What: Service with a popular list and a two-page `robots` search.
fn robots_service() -> ScriptedService {
    let mut svc = ScriptedService {
        popular: Some(page(vec![item(100, "Trending")], None)),
        ..ScriptedService::default()
    };
    svc.first.insert(
        "robots".into(),
        page(vec![item(1, "A"), item(2, "B")], Some("c1")),
    );
    svc.next
        .insert("c1".into(), page(vec![item(3, "C")], None));
    svc
}

#[tokio::test(start_paused = true)]
/// What: First appearance shows the popular list and records the appearance.
///
/// Inputs:
/// - Non-animated appearance, then a second one.
///
/// Output:
/// - Unfocused field, popular visible, popular list displayed; a single popular fetch.
async fn appearance_shows_popular_list() {
    let mut h = Harness::start(robots_service());
    h.send(Intent::ViewAppeared { animated: false });
    let out = h.settle(50).await;
    assert_eq!(
        out,
        vec![
            SessionOutput::Focus(FocusState {
                focused: false,
                animate: false
            }),
            SessionOutput::PopularVisible(true),
            SessionOutput::DisplayList(vec![item(100, "Trending")]),
        ]
    );

    h.send(Intent::ViewAppeared { animated: false });
    assert!(h.settle(50).await.is_empty());
    assert_eq!(h.service.calls(), vec!["popular"]);
    assert_eq!(h.analytics.events(), vec![AnalyticsEvent::ViewAppeared]);
}

#[tokio::test(start_paused = true)]
/// What: Search, paginate to exhaustion, then cancel back to popular.
///
/// Inputs:
/// - Appear, type `robots`, scroll `(8,10),(9,10),(9,10),(10,10)`, more scrolling, cancel.
///
/// Output:
/// - Display goes popular -> [] -> [A,B] -> [A,B,C] -> popular; one next-page fetch only.
async fn search_paginate_and_cancel() {
    let mut h = Harness::start(robots_service());
    h.send(Intent::ViewAppeared { animated: false });
    h.settle(10).await;

    h.send(Intent::TextChanged("robots".into()));
    let typed = h.settle(10).await;
    assert_eq!(
        typed,
        vec![
            SessionOutput::PopularVisible(false),
            SessionOutput::DisplayList(vec![]),
            SessionOutput::Loading(true),
        ]
    );

    let first = h.settle(400).await;
    assert_eq!(
        first,
        vec![
            SessionOutput::Loading(false),
            SessionOutput::DisplayList(vec![item(1, "A"), item(2, "B")]),
        ]
    );

    for (row, total) in [(8, 10), (9, 10), (9, 10), (10, 10)] {
        h.send(Intent::RowVisible { row, total });
    }
    let more = h.settle(10).await;
    assert_eq!(
        display_lists(&more),
        vec![vec![item(1, "A"), item(2, "B"), item(3, "C")]]
    );

    h.send(Intent::RowVisible { row: 0, total: 3 });
    h.send(Intent::RowVisible { row: 2, total: 3 });
    h.settle(10).await;
    assert_eq!(h.service.calls(), vec!["popular", "first:robots", "next:c1"]);

    h.send(Intent::CancelPressed);
    let cancelled = h.settle(10).await;
    assert_eq!(
        cancelled,
        vec![
            SessionOutput::SearchFieldText(String::new()),
            SessionOutput::Focus(FocusState {
                focused: false,
                animate: true
            }),
            SessionOutput::ResignFocus,
            SessionOutput::PopularVisible(true),
            SessionOutput::DisplayList(vec![item(100, "Trending")]),
        ]
    );

    assert_eq!(
        h.analytics.events(),
        vec![
            AnalyticsEvent::ViewAppeared,
            AnalyticsEvent::ResultsShown {
                query: "robots".into(),
                page: 1,
                has_results: true
            },
            AnalyticsEvent::ResultsShown {
                query: "robots".into(),
                page: 2,
                has_results: true
            },
            AnalyticsEvent::SearchCleared,
        ]
    );
}

#[tokio::test(start_paused = true)]
/// What: Keystrokes inside the debounce window produce a single request.
///
/// Inputs:
/// - `r`, `ro`, ..., `robots` typed 50ms apart.
///
/// Output:
/// - Only `first:robots` is requested; every keystroke still cleared the list immediately.
async fn rapid_typing_issues_one_request() {
    let mut h = Harness::start(robots_service());
    h.send(Intent::ViewAppeared { animated: false });
    h.settle(10).await;
    for n in 1..="robots".len() {
        h.send(Intent::TextChanged("robots"[..n].to_string()));
        h.settle(50).await;
    }
    let out = h.settle(400).await;
    assert_eq!(
        display_lists(&out),
        vec![vec![item(1, "A"), item(2, "B")]]
    );
    assert_eq!(h.service.calls(), vec!["popular", "first:robots"]);
}

#[tokio::test(start_paused = true)]
/// What: A search with no results shows the empty state, hidden again on the next query.
async fn empty_results_toggle_empty_state() {
    let mut svc = robots_service();
    svc.first.insert("zzz".into(), page(vec![], None));
    let mut h = Harness::start(svc);
    h.send(Intent::ViewAppeared { animated: false });
    h.settle(10).await;

    h.send(Intent::TextChanged("zzz".into()));
    let out = h.settle(400).await;
    assert!(out.contains(&SessionOutput::EmptyState {
        query: "zzz".into(),
        visible: true
    }));

    h.send(Intent::TextChanged("zz".into()));
    let out = h.settle(10).await;
    assert!(out.contains(&SessionOutput::EmptyState {
        query: "zz".into(),
        visible: false
    }));
}

#[tokio::test(start_paused = true)]
/// What: A failed search stops loading without showing an error.
async fn failed_search_stops_loading() {
    let mut h = Harness::start(robots_service());
    h.send(Intent::ViewAppeared { animated: false });
    h.settle(10).await;
    h.send(Intent::TextChanged("unknown".into()));
    let out = h.settle(400).await;
    assert_eq!(out.last(), Some(&SessionOutput::Loading(false)));
    assert!(!out.iter().any(|o| matches!(o, SessionOutput::EmptyState { .. })));
}

#[tokio::test(start_paused = true)]
/// What: Taps navigate with the list displayed at tap time.
///
/// Inputs:
/// - Search results `[A,B]` displayed, tap on `B`.
///
/// Output:
/// - `Navigate` carrying `B`, `[A,B]`, and the search provenance.
async fn tap_navigates_with_current_list() {
    let mut h = Harness::start(robots_service());
    h.send(Intent::ViewAppeared { animated: false });
    h.send(Intent::TextChanged("robots".into()));
    h.settle(400).await;
    h.send(Intent::ItemTapped(item(2, "B")));
    let out = h.settle(10).await;
    let Some(SessionOutput::Navigate(nav)) = out.last() else {
        panic!("expected navigation, got {out:?}");
    };
    assert_eq!(nav.item, item(2, "B"));
    assert_eq!(nav.list, vec![item(1, "A"), item(2, "B")]);
    assert_eq!(nav.provenance, Provenance::Search);
}

#[tokio::test(start_paused = true)]
/// What: Dropping the intent sender ends the session.
async fn dropping_intents_ends_session() {
    let h = Harness::start(robots_service());
    let SessionHandle {
        intents,
        outputs: _outputs,
        task,
    } = h.session;
    drop(intents);
    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("session ended")
        .expect("session did not panic");
}
