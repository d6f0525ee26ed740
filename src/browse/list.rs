//! Paginated list controller
//!
//! Owns the state of one scrolling catalog list: accumulated items, loading
//! flags, the page cursor, genre and sort selection, and the last error.
//!
//! Loads never fail outward. A failed fetch leaves the items untouched and
//! records the error text for the front end to show next to a retry action.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::PageSource;
use crate::eligibility::TitleEligibility;
use crate::models::{FilterType, Genre, Titled};

// =============================================================================
// List State
// =============================================================================

/// Observable state of a paginated list
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    /// Items of every page loaded since the last reset, in page order
    pub items: Vec<T>,
    /// First page in flight
    pub is_loading: bool,
    /// Follow-up page in flight
    pub is_loading_more: bool,
    /// Message of the last failure, cleared when a load starts
    pub error_message: Option<String>,
    /// Last page that loaded successfully
    pub current_page: u32,
    /// False once a page came back empty after filtering
    pub can_load_more: bool,
    pub selected_filter: FilterType,
    /// 0 = all genres
    pub selected_genre_id: u32,
    pub genres: Vec<Genre>,
}

impl<T> ListState<T> {
    /// State of a freshly mounted list, waiting on its first page
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            is_loading: true,
            is_loading_more: false,
            error_message: None,
            current_page: 0,
            can_load_more: true,
            selected_filter: FilterType::Default,
            selected_genre_id: Genre::ALL_ID,
            genres: Vec::new(),
        }
    }

    /// Whether `load_more` would issue a fetch right now
    pub fn can_request_more(&self) -> bool {
        !self.is_loading && !self.is_loading_more && self.can_load_more
    }
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters of one in-flight fetch
#[derive(Debug, Clone, Copy)]
struct PageRequest {
    generation: u64,
    page: u32,
    genre_id: u32,
    filter: FilterType,
}

// =============================================================================
// List Controller
// =============================================================================

/// Paginated list over any `PageSource`
pub struct ListController<S: PageSource> {
    source: S,
    eligibility: Arc<dyn TitleEligibility>,
    state: watch::Sender<ListState<S::Item>>,
    /// Bumped by every load; completions of older loads are dropped
    generation: AtomicU64,
}

impl<S: PageSource> ListController<S> {
    pub fn new(source: S, eligibility: Arc<dyn TitleEligibility>) -> Self {
        Self {
            source,
            eligibility,
            state: watch::Sender::new(ListState::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Preset the sort order before the first load
    pub fn with_filter(self, filter: FilterType) -> Self {
        self.state.send_modify(|state| state.selected_filter = filter);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Receiver that observes every state change
    pub fn subscribe(&self) -> watch::Receiver<ListState<S::Item>> {
        self.state.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ListState<S::Item> {
        self.state.borrow().clone()
    }

    /// Fetch the genre list. Failure is only reported through `error_message`.
    pub async fn load_genres(&self) {
        match self.source.fetch_genres().await {
            Ok(genres) => {
                debug!(count = genres.len(), "genres loaded");
                self.state.send_modify(|state| state.genres = genres);
            }
            Err(e) => {
                warn!(error = %e, "genre fetch failed");
                self.state
                    .send_modify(|state| state.error_message = Some(e.to_string()));
            }
        }
    }

    /// Narrow the list to a genre and reload from the first page
    pub async fn select_genre(&self, genre_id: u32) {
        self.state
            .send_modify(|state| state.selected_genre_id = genre_id);
        self.refresh().await;
    }

    /// Change the sort order and reload from the first page
    pub async fn select_filter_type(&self, filter: FilterType) {
        self.state.send_modify(|state| state.selected_filter = filter);
        self.refresh().await;
    }

    /// Load `page`. Page 0 replaces the items, later pages append.
    pub async fn load(&self, page: u32) {
        let mut request = None;
        self.state
            .send_modify(|state| request = Some(self.start(state, page)));

        if let Some(request) = request {
            self.finish(request).await;
        }
    }

    /// Load the page after `current_page` unless a load is running or the
    /// list is exhausted. Returns whether a fetch was issued.
    pub async fn load_more(&self) -> bool {
        let mut request = None;
        self.state.send_if_modified(|state| {
            if !state.can_request_more() {
                return false;
            }
            let page = state.current_page + 1;
            request = Some(self.start(state, page));
            true
        });

        match request {
            Some(request) => {
                self.finish(request).await;
                true
            }
            None => {
                debug!("load_more ignored");
                false
            }
        }
    }

    /// Re-issue the load of the current page
    pub async fn retry(&self) {
        let page = self.state.borrow().current_page;
        self.load(page).await;
    }

    /// Reload from the first page
    pub async fn refresh(&self) {
        self.load(0).await;
    }

    /// Mark a fetch in flight and capture the selection it runs with
    fn start(&self, state: &mut ListState<S::Item>, page: u32) -> PageRequest {
        state.is_loading = page == 0;
        state.is_loading_more = page > 0;
        state.error_message = None;

        PageRequest {
            generation: self.generation.fetch_add(1, Ordering::SeqCst) + 1,
            page,
            genre_id: state.selected_genre_id,
            filter: state.selected_filter,
        }
    }

    async fn finish(&self, request: PageRequest) {
        debug!(
            page = request.page,
            genre = request.genre_id,
            filter = request.filter.api_key(),
            "fetching page"
        );

        let result = self
            .source
            .fetch_page(request.page, request.genre_id, request.filter)
            .await;

        let result = result.map(|items| {
            items
                .into_iter()
                .filter(|item| self.eligibility.should_display(item.title()))
                .collect::<Vec<_>>()
        });

        // Generation is bumped under the same lock in `start`, so a newer
        // load cannot begin between this check and the write
        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != request.generation {
                return false;
            }
            match result {
                Ok(items) => {
                    debug!(page = request.page, count = items.len(), "page loaded");
                    state.can_load_more = !items.is_empty();
                    if request.page == 0 {
                        state.items = items;
                    } else {
                        state.items.extend(items);
                    }
                    state.current_page = request.page;
                }
                Err(e) => {
                    warn!(page = request.page, error = %e, "page fetch failed");
                    state.error_message = Some(e.to_string());
                }
            }
            state.is_loading = false;
            state.is_loading_more = false;
            true
        });

        if !applied {
            debug!(page = request.page, "discarding superseded page");
        }
    }
}
