//! ccloud-browse - paginated browsing for the CCloud catalog
//!
//! Movie, series, country and search listings as observable controllers,
//! backed by the CCloud catalog API.
//!
//! # Modules
//!
//! - `models` - Catalog records, genres, countries, sort orders
//! - `api` - Catalog API client
//! - `browse` - List, home and search controllers
//! - `eligibility` - Title display filter
//! - `config` - Config file and environment overrides
//! - `cli` / `commands` - Scriptable front end

pub mod api;
pub mod browse;
pub mod cli;
pub mod commands;
pub mod config;
pub mod eligibility;
pub mod models;

// Re-export commonly used types
pub use models::{Country, FilterType, Genre, Movie, Poster, PosterKind, Series, Source, Titled};

pub use api::{CcloudClient, CcloudError};
pub use browse::{HomeFeed, ListController, ListState, PageSource, SearchController, SearchState};
pub use eligibility::{AllowAll, ScriptFilter, TitleEligibility, TitlePolicy};
