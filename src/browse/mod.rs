//! Browsing controllers
//!
//! Screen-level state holders that sit between a front end and the catalog:
//!
//! - `list` - generic paginated list with genre and sort selection
//! - `sources` - catalog adapters feeding the list controller
//! - `home` - six fixed-sort sections loaded side by side
//! - `search` - free-text search plus the country directory
//!
//! Controllers keep their state in a `tokio::sync::watch` channel. Front ends
//! call `subscribe()` and re-render whenever the receiver changes.

pub mod home;
pub mod list;
pub mod search;
pub mod sources;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{FilterType, Genre, Titled};

pub use home::HomeFeed;
pub use list::{ListController, ListState};
pub use search::{SearchController, SearchState};
pub use sources::{CountryCatalog, MovieCatalog, SeriesCatalog};

/// Repository capability behind a paginated list
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Titled + Clone + Send + Sync + 'static;

    /// Fetch one page. Pages are zero-based; genre id 0 means all genres.
    async fn fetch_page(
        &self,
        page: u32,
        genre_id: u32,
        filter: FilterType,
    ) -> Result<Vec<Self::Item>>;

    /// Genres this source can be narrowed by
    async fn fetch_genres(&self) -> Result<Vec<Genre>> {
        Ok(Vec::new())
    }
}
