//! Catalog adapters for the list controller
//!
//! Each adapter shares one `CcloudClient` and exposes a single listing as a
//! `PageSource`.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::PageSource;
use crate::api::CcloudClient;
use crate::models::{Country, FilterType, Genre, Movie, Poster, Series};

/// Movie listing narrowed by genre
#[derive(Debug, Clone)]
pub struct MovieCatalog {
    client: Arc<CcloudClient>,
}

impl MovieCatalog {
    pub fn new(client: Arc<CcloudClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for MovieCatalog {
    type Item = Movie;

    async fn fetch_page(&self, page: u32, genre_id: u32, filter: FilterType) -> Result<Vec<Movie>> {
        self.client.movies(page, genre_id, filter).await
    }

    async fn fetch_genres(&self) -> Result<Vec<Genre>> {
        self.client.genres().await
    }
}

/// Series listing narrowed by genre
#[derive(Debug, Clone)]
pub struct SeriesCatalog {
    client: Arc<CcloudClient>,
}

impl SeriesCatalog {
    pub fn new(client: Arc<CcloudClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for SeriesCatalog {
    type Item = Series;

    async fn fetch_page(
        &self,
        page: u32,
        genre_id: u32,
        filter: FilterType,
    ) -> Result<Vec<Series>> {
        self.client.series(page, genre_id, filter).await
    }

    async fn fetch_genres(&self) -> Result<Vec<Genre>> {
        self.client.genres().await
    }
}

/// Posters produced in one country. The listing has no genre dimension.
#[derive(Debug, Clone)]
pub struct CountryCatalog {
    client: Arc<CcloudClient>,
    country: Country,
}

impl CountryCatalog {
    pub fn new(client: Arc<CcloudClient>, country: Country) -> Self {
        Self { client, country }
    }

    /// Display name shown in the screen title
    pub fn country_name(&self) -> &str {
        &self.country.title
    }
}

#[async_trait]
impl PageSource for CountryCatalog {
    type Item = Poster;

    async fn fetch_page(&self, page: u32, _genre_id: u32, filter: FilterType) -> Result<Vec<Poster>> {
        self.client
            .country_posters(self.country.id, page, filter)
            .await
    }
}
