//! Search controller
//!
//! Holds the query text, the last result set and the country directory shown
//! before the first search.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::CcloudClient;
use crate::eligibility::TitleEligibility;
use crate::models::{Country, Poster};

/// Backend for free-text search and the country directory
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Poster>>;
    async fn countries(&self) -> Result<Vec<Country>>;
}

#[async_trait]
impl SearchBackend for CcloudClient {
    async fn search(&self, query: &str) -> Result<Vec<Poster>> {
        CcloudClient::search(self, query).await
    }

    async fn countries(&self) -> Result<Vec<Country>> {
        CcloudClient::countries(self).await
    }
}

/// Observable search screen state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<Poster>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    /// True once a search completed since the last clear
    pub has_searched: bool,
    pub countries: Vec<Country>,
    pub is_countries_loading: bool,
}

impl SearchState {
    /// Searched, finished and found nothing
    pub fn is_empty_result(&self) -> bool {
        self.has_searched
            && !self.query.is_empty()
            && !self.is_loading
            && self.error_message.is_none()
            && self.results.is_empty()
    }
}

/// Search screen controller
pub struct SearchController<B: SearchBackend = CcloudClient> {
    backend: B,
    eligibility: Arc<dyn TitleEligibility>,
    state: watch::Sender<SearchState>,
    generation: AtomicU64,
}

impl<B: SearchBackend> SearchController<B> {
    pub fn new(backend: B, eligibility: Arc<dyn TitleEligibility>) -> Self {
        Self {
            backend,
            eligibility,
            state: watch::Sender::new(SearchState::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn update_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_modify(|state| state.query = query);
    }

    /// Run the current query. Blank queries are ignored.
    pub async fn trigger_search(&self) {
        let query = self.state.borrow().query.trim().to_string();
        if query.is_empty() {
            debug!("blank query, search skipped");
            return;
        }

        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.is_loading = true;
            state.error_message = None;
        });

        let result = self.backend.search(&query).await.map(|posters| {
            posters
                .into_iter()
                .filter(|p| self.eligibility.should_display(&p.title))
                .collect::<Vec<_>>()
        });

        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            match result {
                Ok(posters) => {
                    debug!(query = %query, count = posters.len(), "search finished");
                    state.results = posters;
                }
                Err(e) => {
                    warn!(query = %query, error = %e, "search failed");
                    state.error_message = Some(e.to_string());
                }
            }
            state.has_searched = true;
            state.is_loading = false;
            true
        });

        if !applied {
            debug!(query = %query, "discarding superseded search");
        }
    }

    /// Back to the pre-search screen. Any running search is abandoned.
    pub fn clear_search(&self) {
        self.state.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            state.query.clear();
            state.results.clear();
            state.error_message = None;
            state.has_searched = false;
            state.is_loading = false;
        });
    }

    /// Fetch the country directory. Failure leaves it empty.
    pub async fn load_countries(&self) {
        self.state
            .send_modify(|state| state.is_countries_loading = true);

        let result = self.backend.countries().await;

        self.state.send_modify(|state| {
            match result {
                Ok(countries) => state.countries = countries,
                Err(e) => warn!(error = %e, "country directory unavailable"),
            }
            state.is_countries_loading = false;
        });
    }
}
