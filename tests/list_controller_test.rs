//! Paginated list controller tests
//!
//! Drives `ListController` against a scripted in-memory source: page
//! replacement and accumulation, exhaustion, guards, selection resets,
//! error capture, and stale completions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Notify;

use ccloud_browse::browse::{ListController, PageSource};
use ccloud_browse::eligibility::{AllowAll, ScriptFilter, TitleEligibility};
use ccloud_browse::models::{FilterType, Genre, Titled};

// =============================================================================
// Scripted Source
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Item(String);

impl Titled for Item {
    fn title(&self) -> &str {
        &self.0
    }
}

fn items(prefix: &str, n: usize) -> Vec<Item> {
    (0..n).map(|i| Item(format!("{} {}", prefix, i))).collect()
}

#[derive(Default)]
struct ScriptedSource {
    pages: Mutex<HashMap<u32, Vec<Item>>>,
    failure: Mutex<Option<String>>,
    genres: Mutex<Option<Vec<Genre>>>,
    calls: Mutex<Vec<(u32, u32, FilterType)>>,
    gated_page: Option<u32>,
    gate: Notify,
}

impl ScriptedSource {
    fn with_pages(pages: Vec<(u32, Vec<Item>)>) -> Self {
        Self {
            pages: Mutex::new(pages.into_iter().collect()),
            ..Default::default()
        }
    }

    fn set_page(&self, page: u32, items: Vec<Item>) {
        self.pages.lock().unwrap().insert(page, items);
    }

    fn fail_with(&self, msg: Option<&str>) {
        *self.failure.lock().unwrap() = msg.map(String::from);
    }

    fn calls(&self) -> Vec<(u32, u32, FilterType)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    type Item = Item;

    async fn fetch_page(&self, page: u32, genre_id: u32, filter: FilterType) -> Result<Vec<Item>> {
        self.calls.lock().unwrap().push((page, genre_id, filter));

        if self.gated_page == Some(page) {
            self.gate.notified().await;
        }

        let failure = self.failure.lock().unwrap().clone();
        if let Some(msg) = failure {
            anyhow::bail!("{}", msg);
        }

        let page_items = self.pages.lock().unwrap().get(&page).cloned();
        Ok(page_items.unwrap_or_default())
    }

    async fn fetch_genres(&self) -> Result<Vec<Genre>> {
        let genres = self.genres.lock().unwrap().clone();
        genres.ok_or_else(|| anyhow::anyhow!("genres unavailable"))
    }
}

fn controller(source: ScriptedSource) -> ListController<ScriptedSource> {
    ListController::new(source, Arc::new(AllowAll))
}

// =============================================================================
// Page Replacement and Accumulation
// =============================================================================

#[tokio::test]
async fn test_first_page_replaces_items() {
    let ctl = controller(ScriptedSource::with_pages(vec![(0, items("old", 3))]));
    ctl.refresh().await;
    assert_eq!(ctl.snapshot().items, items("old", 3));

    ctl.source().set_page(0, items("new", 2));
    ctl.refresh().await;

    let state = ctl.snapshot();
    assert_eq!(state.items, items("new", 2));
    assert_eq!(state.current_page, 0);
    assert!(!state.is_loading);
    assert!(!state.is_loading_more);
}

#[tokio::test]
async fn test_later_pages_append_in_order() {
    let ctl = controller(ScriptedSource::with_pages(vec![
        (0, items("p0", 2)),
        (1, items("p1", 2)),
        (2, items("p2", 1)),
    ]));

    ctl.refresh().await;
    assert!(ctl.load_more().await);
    assert!(ctl.load_more().await);

    let state = ctl.snapshot();
    let mut expected = items("p0", 2);
    expected.extend(items("p1", 2));
    expected.extend(items("p2", 1));
    assert_eq!(state.items, expected);
    assert_eq!(state.current_page, 2);
    assert!(state.can_load_more);
}

#[tokio::test]
async fn test_empty_second_page_exhausts_list() {
    let ctl = controller(ScriptedSource::with_pages(vec![(0, items("movie", 20))]));

    ctl.load(0).await;
    assert!(ctl.load_more().await);

    let state = ctl.snapshot();
    assert_eq!(state.items.len(), 20);
    assert!(!state.can_load_more);
    assert_eq!(state.current_page, 1);

    // Exhausted: further requests never reach the source
    let calls_before = ctl.source().calls().len();
    assert!(!ctl.load_more().await);
    assert!(!ctl.load_more().await);
    assert_eq!(ctl.source().calls().len(), calls_before);
    assert_eq!(ctl.snapshot(), state);
}

#[tokio::test]
async fn test_eligibility_filters_titles() {
    let source = ScriptedSource::with_pages(vec![
        (
            0,
            vec![
                Item("Parasite".into()),
                Item("기생충".into()),
                Item("Oldboy".into()),
            ],
        ),
        (1, vec![Item("올드보이".into())]),
    ]);
    let eligibility: Arc<dyn TitleEligibility> = Arc::new(ScriptFilter::latin_and_persian());
    let ctl = ListController::new(source, eligibility);

    ctl.refresh().await;
    assert_eq!(
        ctl.snapshot().items,
        vec![Item("Parasite".into()), Item("Oldboy".into())]
    );

    // A page whose every title is filtered out counts as empty
    ctl.load_more().await;
    let state = ctl.snapshot();
    assert_eq!(state.items.len(), 2);
    assert!(!state.can_load_more);
}

// =============================================================================
// Guards
// =============================================================================

#[tokio::test]
async fn test_load_more_ignored_before_first_load() {
    let ctl = controller(ScriptedSource::with_pages(vec![(0, items("a", 1))]));

    // Freshly mounted lists start in the loading state
    let before = ctl.snapshot();
    assert!(before.is_loading);

    assert!(!ctl.load_more().await);
    assert!(ctl.source().calls().is_empty());
    assert_eq!(ctl.snapshot(), before);
}

#[tokio::test]
async fn test_load_more_ignored_while_loading_more() {
    let source = ScriptedSource {
        gated_page: Some(1),
        ..ScriptedSource::with_pages(vec![(0, items("p0", 2)), (1, items("p1", 2))])
    };
    let ctl = controller(source);
    ctl.refresh().await;

    let observe = async {
        tokio::task::yield_now().await;

        let state = ctl.snapshot();
        assert!(state.is_loading_more);
        assert!(!state.is_loading);

        // Second request while page 1 is in flight
        assert!(!ctl.load_more().await);
        ctl.source().gate.notify_one();
    };

    let (issued, ()) = tokio::join!(ctl.load_more(), observe);
    assert!(issued);

    let calls: Vec<u32> = ctl.source().calls().iter().map(|c| c.0).collect();
    assert_eq!(calls, vec![0, 1]);

    let state = ctl.snapshot();
    assert_eq!(state.items.len(), 4);
    assert!(!state.is_loading_more);
}

#[tokio::test]
async fn test_concurrent_load_more_issues_one_fetch() {
    let source = ScriptedSource {
        gated_page: Some(1),
        ..ScriptedSource::with_pages(vec![(0, items("p0", 2)), (1, items("p1", 2))])
    };
    let ctl = controller(source);
    ctl.refresh().await;

    let scrolls = futures::future::join_all((0..4).map(|_| ctl.load_more()));
    let release = async {
        tokio::task::yield_now().await;
        ctl.source().gate.notify_one();
    };
    let (issued, ()) = tokio::join!(scrolls, release);

    assert_eq!(issued.iter().filter(|i| **i).count(), 1);
    assert_eq!(ctl.snapshot().items.len(), 4);
    assert_eq!(ctl.snapshot().current_page, 1);
}

#[tokio::test]
async fn test_first_page_sets_only_is_loading() {
    let source = ScriptedSource {
        gated_page: Some(0),
        ..ScriptedSource::with_pages(vec![(0, items("p0", 1))])
    };
    let ctl = controller(source);

    let observe = async {
        tokio::task::yield_now().await;
        let state = ctl.snapshot();
        assert!(state.is_loading);
        assert!(!state.is_loading_more);
        ctl.source().gate.notify_one();
    };
    tokio::join!(ctl.refresh(), observe);

    let state = ctl.snapshot();
    assert!(!state.is_loading);
    assert!(!state.is_loading_more);
}

// =============================================================================
// Selection
// =============================================================================

#[tokio::test]
async fn test_select_genre_resets_to_first_page() {
    let ctl = controller(ScriptedSource::with_pages(vec![
        (0, items("p0", 2)),
        (1, items("p1", 2)),
    ]));
    ctl.refresh().await;
    ctl.load_more().await;
    assert_eq!(ctl.snapshot().current_page, 1);

    ctl.source().set_page(0, items("drama", 3));
    ctl.select_genre(4).await;

    let state = ctl.snapshot();
    assert_eq!(state.selected_genre_id, 4);
    assert_eq!(state.current_page, 0);
    assert_eq!(state.items, items("drama", 3));
    assert_eq!(ctl.source().calls().last(), Some(&(0, 4, FilterType::Default)));
}

#[tokio::test]
async fn test_select_filter_type_resets_to_first_page() {
    let ctl = controller(ScriptedSource::with_pages(vec![
        (0, items("p0", 2)),
        (1, items("p1", 2)),
    ]));
    ctl.select_genre(2).await;
    ctl.load_more().await;

    ctl.source().set_page(0, items("top", 1));
    ctl.select_filter_type(FilterType::ByImdb).await;

    let state = ctl.snapshot();
    assert_eq!(state.selected_filter, FilterType::ByImdb);
    assert_eq!(state.current_page, 0);
    assert_eq!(state.items, items("top", 1));
    // Genre survives a sort change
    assert_eq!(ctl.source().calls().last(), Some(&(0, 2, FilterType::ByImdb)));
}

#[tokio::test]
async fn test_with_filter_presets_sort() {
    let ctl = controller(ScriptedSource::with_pages(vec![(0, items("a", 1))]))
        .with_filter(FilterType::ByViews);
    ctl.refresh().await;

    assert_eq!(ctl.source().calls(), vec![(0, 0, FilterType::ByViews)]);
}

// =============================================================================
// Errors and Retry
// =============================================================================

#[tokio::test]
async fn test_timeout_on_first_load() {
    let source = ScriptedSource::default();
    source.fail_with(Some("timeout"));
    let ctl = controller(source);

    ctl.load(0).await;

    let state = ctl.snapshot();
    assert_eq!(state.error_message.as_deref(), Some("timeout"));
    assert!(state.items.is_empty());
    assert!(!state.is_loading);
    assert!(!state.is_loading_more);
}

#[tokio::test]
async fn test_failed_load_more_keeps_items_and_page() {
    let ctl = controller(ScriptedSource::with_pages(vec![
        (0, items("p0", 3)),
        (1, items("p1", 3)),
    ]));
    ctl.refresh().await;

    ctl.source().fail_with(Some("connection reset"));
    assert!(ctl.load_more().await);

    let state = ctl.snapshot();
    assert_eq!(state.items, items("p0", 3));
    assert_eq!(state.current_page, 0);
    assert_eq!(state.error_message.as_deref(), Some("connection reset"));
    assert!(state.can_load_more);
    assert!(!state.is_loading_more);
}

#[tokio::test]
async fn test_retry_reloads_current_page_and_clears_error() {
    let source = ScriptedSource::with_pages(vec![(0, items("p0", 2))]);
    source.fail_with(Some("timeout"));
    let ctl = controller(source);

    ctl.refresh().await;
    assert!(ctl.snapshot().error_message.is_some());

    ctl.source().fail_with(None);
    ctl.retry().await;

    let state = ctl.snapshot();
    assert!(state.error_message.is_none());
    assert_eq!(state.items, items("p0", 2));
    let pages: Vec<u32> = ctl.source().calls().iter().map(|c| c.0).collect();
    assert_eq!(pages, vec![0, 0]);
}

#[tokio::test]
async fn test_genres_loaded() {
    let source = ScriptedSource::default();
    *source.genres.lock().unwrap() = Some(vec![
        Genre { id: 1, title: "Action".into() },
        Genre { id: 2, title: "Drama".into() },
    ]);
    let ctl = controller(source);

    ctl.load_genres().await;

    let state = ctl.snapshot();
    assert_eq!(state.genres.len(), 2);
    assert!(state.error_message.is_none());
}

#[tokio::test]
async fn test_genre_failure_surfaces_message() {
    let ctl = controller(ScriptedSource::default());

    ctl.load_genres().await;

    let state = ctl.snapshot();
    assert!(state.genres.is_empty());
    assert_eq!(state.error_message.as_deref(), Some("genres unavailable"));
}

// =============================================================================
// Observation and Stale Completions
// =============================================================================

#[tokio::test]
async fn test_subscribers_see_loaded_page() {
    let ctl = controller(ScriptedSource::with_pages(vec![(0, items("p0", 2))]));
    let mut rx = ctl.subscribe();
    assert!(!rx.has_changed().unwrap());

    ctl.refresh().await;

    assert!(rx.has_changed().unwrap());
    let state = rx.borrow_and_update().clone();
    assert_eq!(state.items.len(), 2);
}

#[tokio::test]
async fn test_refresh_supersedes_in_flight_page() {
    let source = ScriptedSource {
        gated_page: Some(1),
        ..ScriptedSource::with_pages(vec![(0, items("p0", 2)), (1, items("p1", 2))])
    };
    let ctl = controller(source);
    ctl.refresh().await;

    let reset = async {
        tokio::task::yield_now().await;
        ctl.source().set_page(0, items("fresh", 1));
        ctl.refresh().await;
        // Let the stale page 1 complete after the reset
        ctl.source().gate.notify_one();
    };
    tokio::join!(ctl.load_more(), reset);

    let state = ctl.snapshot();
    assert_eq!(state.items, items("fresh", 1));
    assert_eq!(state.current_page, 0);
    assert!(!state.is_loading);
    assert!(!state.is_loading_more);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_refresh_while_page_is_filtered_discards_it() {
    let filtering = Arc::new(AtomicBool::new(false));
    let release = Arc::new(AtomicBool::new(false));
    let eligibility: Arc<dyn TitleEligibility> = {
        let (filtering, release) = (filtering.clone(), release.clone());
        Arc::new(move |title: &str| {
            if title == "p1" {
                filtering.store(true, Ordering::SeqCst);
                while !release.load(Ordering::SeqCst) {
                    std::thread::sleep(Duration::from_millis(1));
                }
            }
            true
        })
    };

    let source = ScriptedSource {
        gated_page: Some(0),
        ..ScriptedSource::with_pages(vec![
            (0, vec![Item("p0".into())]),
            (1, vec![Item("p1".into())]),
        ])
    };
    let ctl = Arc::new(ListController::new(source, eligibility));

    // Let the first load through the gate
    ctl.source().gate.notify_one();
    ctl.refresh().await;
    assert_eq!(ctl.snapshot().items, vec![Item("p0".into())]);

    let scroll = tokio::spawn({
        let ctl = ctl.clone();
        async move { ctl.load_more().await }
    });
    while !filtering.load(Ordering::SeqCst) {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    // Page 1 is between fetch and write; a refresh starts on another worker
    ctl.source().set_page(0, vec![Item("fresh".into())]);
    let reset = tokio::spawn({
        let ctl = ctl.clone();
        async move { ctl.refresh().await }
    });
    while ctl.source().calls().len() < 3 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    release.store(true, Ordering::SeqCst);
    assert!(scroll.await.unwrap());

    let mid = ctl.snapshot();
    assert!(mid.is_loading);
    assert!(!mid.is_loading_more);
    assert_eq!(mid.items, vec![Item("p0".into())]);
    assert_eq!(mid.current_page, 0);

    ctl.source().gate.notify_one();
    reset.await.unwrap();

    let state = ctl.snapshot();
    assert_eq!(state.items, vec![Item("fresh".into())]);
    assert!(!state.is_loading);
    assert!(!state.is_loading_more);
}
