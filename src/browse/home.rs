//! Home feed
//!
//! Six single-page rows: new, top rated and most viewed, for movies and for
//! series. Each row is its own list controller with a fixed sort order, so a
//! failing row shows its own error and retries on its own.

use std::sync::Arc;

use super::{ListController, MovieCatalog, PageSource, SeriesCatalog};
use crate::api::CcloudClient;
use crate::eligibility::TitleEligibility;
use crate::models::FilterType;

/// Row of the home feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeSection {
    NewMovies,
    NewSeries,
    TopMovies,
    TopSeries,
    PopularMovies,
    PopularSeries,
}

impl HomeSection {
    pub const ALL: [HomeSection; 6] = [
        HomeSection::NewMovies,
        HomeSection::NewSeries,
        HomeSection::TopMovies,
        HomeSection::TopSeries,
        HomeSection::PopularMovies,
        HomeSection::PopularSeries,
    ];

    /// Sort order the row is fetched with
    pub fn filter(&self) -> FilterType {
        match self {
            HomeSection::NewMovies | HomeSection::NewSeries => FilterType::Default,
            HomeSection::TopMovies | HomeSection::TopSeries => FilterType::ByImdb,
            HomeSection::PopularMovies | HomeSection::PopularSeries => FilterType::ByViews,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            HomeSection::NewMovies => "New Movies",
            HomeSection::NewSeries => "New Series",
            HomeSection::TopMovies => "Top Movies",
            HomeSection::TopSeries => "Top Series",
            HomeSection::PopularMovies => "Popular Movies",
            HomeSection::PopularSeries => "Popular Series",
        }
    }
}

/// The six home rows
pub struct HomeFeed<M: PageSource = MovieCatalog, S: PageSource = SeriesCatalog> {
    pub new_movies: ListController<M>,
    pub new_series: ListController<S>,
    pub top_movies: ListController<M>,
    pub top_series: ListController<S>,
    pub popular_movies: ListController<M>,
    pub popular_series: ListController<S>,
}

impl HomeFeed {
    /// Feed backed by the catalog API
    pub fn from_client(client: Arc<CcloudClient>, eligibility: Arc<dyn TitleEligibility>) -> Self {
        Self::new(
            MovieCatalog::new(client.clone()),
            SeriesCatalog::new(client),
            eligibility,
        )
    }
}

impl<M, S> HomeFeed<M, S>
where
    M: PageSource + Clone,
    S: PageSource + Clone,
{
    pub fn new(movies: M, series: S, eligibility: Arc<dyn TitleEligibility>) -> Self {
        let movie_row = |section: HomeSection| {
            ListController::new(movies.clone(), eligibility.clone()).with_filter(section.filter())
        };
        let series_row = |section: HomeSection| {
            ListController::new(series.clone(), eligibility.clone()).with_filter(section.filter())
        };

        Self {
            new_movies: movie_row(HomeSection::NewMovies),
            new_series: series_row(HomeSection::NewSeries),
            top_movies: movie_row(HomeSection::TopMovies),
            top_series: series_row(HomeSection::TopSeries),
            popular_movies: movie_row(HomeSection::PopularMovies),
            popular_series: series_row(HomeSection::PopularSeries),
        }
    }
}

impl<M: PageSource, S: PageSource> HomeFeed<M, S> {
    /// Load the first page of every row concurrently
    pub async fn load_all(&self) {
        tokio::join!(
            self.new_movies.refresh(),
            self.new_series.refresh(),
            self.top_movies.refresh(),
            self.top_series.refresh(),
            self.popular_movies.refresh(),
            self.popular_series.refresh(),
        );
    }

    /// Reload one row
    pub async fn retry(&self, section: HomeSection) {
        match section {
            HomeSection::NewMovies => self.new_movies.refresh().await,
            HomeSection::NewSeries => self.new_series.refresh().await,
            HomeSection::TopMovies => self.top_movies.refresh().await,
            HomeSection::TopSeries => self.top_series.refresh().await,
            HomeSection::PopularMovies => self.popular_movies.refresh().await,
            HomeSection::PopularSeries => self.popular_series.refresh().await,
        }
    }

    /// Movie row for a movie section
    pub fn movie_row(&self, section: HomeSection) -> Option<&ListController<M>> {
        match section {
            HomeSection::NewMovies => Some(&self.new_movies),
            HomeSection::TopMovies => Some(&self.top_movies),
            HomeSection::PopularMovies => Some(&self.popular_movies),
            _ => None,
        }
    }

    /// Series row for a series section
    pub fn series_row(&self, section: HomeSection) -> Option<&ListController<S>> {
        match section {
            HomeSection::NewSeries => Some(&self.new_series),
            HomeSection::TopSeries => Some(&self.top_series),
            HomeSection::PopularSeries => Some(&self.popular_series),
            _ => None,
        }
    }
}
