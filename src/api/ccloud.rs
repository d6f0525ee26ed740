//! CCloud catalog API client
//!
//! Paginated movie/series listings, single titles, country posters, search,
//! and the genre and country directories. Every endpoint ends with the API key
//! as a path segment.

use anyhow::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::models::{Country, FilterType, Genre, Movie, Poster, Series};

/// Default catalog API root
pub const DEFAULT_BASE_URL: &str = "https://ccloud.example.net/api";

/// Catalog API error types
#[derive(Error, Debug)]
pub enum CcloudError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// Catalog API client
#[derive(Debug, Clone)]
pub struct CcloudClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl CcloudClient {
    /// Create a client against the default API root
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing and mirrors)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::with_timeout(api_key, base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Make a GET request and decode the JSON body
    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T, CcloudError> {
        let url = format!("{}{}{}/", self.base_url, endpoint, self.api_key);
        debug!(endpoint, "catalog request");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map_err(|e| CcloudError::InvalidResponse(format!("JSON parse error: {}", e)))
            }
            StatusCode::NOT_FOUND => Err(CcloudError::NotFound),
            status => Err(CcloudError::ServerError(status.as_u16())),
        }
    }

    /// One page of movies
    pub async fn movies(&self, page: u32, genre_id: u32, filter: FilterType) -> Result<Vec<Movie>> {
        let endpoint = format!(
            "/movie/by/filtres/{}/{}/{}/",
            genre_id,
            filter.api_key(),
            page
        );
        Ok(self.get(&endpoint).await?)
    }

    /// One page of series
    pub async fn series(&self, page: u32, genre_id: u32, filter: FilterType) -> Result<Vec<Series>> {
        let endpoint = format!(
            "/serie/by/filtres/{}/{}/{}/",
            genre_id,
            filter.api_key(),
            page
        );
        Ok(self.get(&endpoint).await?)
    }

    /// One page of posters produced in a country
    pub async fn country_posters(
        &self,
        country_id: u32,
        page: u32,
        filter: FilterType,
    ) -> Result<Vec<Poster>> {
        let endpoint = format!(
            "/poster/by/country/{}/{}/{}/",
            country_id,
            filter.api_key(),
            page
        );
        Ok(self.get(&endpoint).await?)
    }

    /// One movie with its playable sources
    pub async fn movie(&self, id: u64) -> Result<Movie> {
        Ok(self.get(&format!("/movie/by/{}/", id)).await?)
    }

    /// One series
    pub async fn serie(&self, id: u64) -> Result<Series> {
        Ok(self.get(&format!("/serie/by/{}/", id)).await?)
    }

    /// Search movies and series by title
    pub async fn search(&self, query: &str) -> Result<Vec<Poster>> {
        let endpoint = format!("/search/{}/", urlencoding::encode(query.trim()));
        let response: SearchResponse = self.get(&endpoint).await?;
        Ok(response.posters)
    }

    /// Full genre directory
    pub async fn genres(&self) -> Result<Vec<Genre>> {
        Ok(self.get("/genre/all/").await?)
    }

    /// Full country directory
    pub async fn countries(&self) -> Result<Vec<Country>> {
        Ok(self.get("/country/all/").await?)
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    posters: Vec<Poster>,
}
