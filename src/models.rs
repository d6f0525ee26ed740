//! Data structures for the CCloud catalog
//!
//! Shared models organized by domain:
//! - **Catalog**: movies, series and the unified poster record
//! - **Taxonomy**: genres, countries and the server-side sort order

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Sort Order
// =============================================================================

/// Server-side sort order for catalog listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Newest first
    #[default]
    Default,
    ByYear,
    ByImdb,
    ByViews,
}

impl FilterType {
    pub const ALL: [FilterType; 4] = [
        FilterType::Default,
        FilterType::ByYear,
        FilterType::ByImdb,
        FilterType::ByViews,
    ];

    /// Order key used in catalog API paths
    pub fn api_key(&self) -> &'static str {
        match self {
            FilterType::Default => "created",
            FilterType::ByYear => "year",
            FilterType::ByImdb => "imdb",
            FilterType::ByViews => "views",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterType::Default => write!(f, "Default"),
            FilterType::ByYear => write!(f, "Year"),
            FilterType::ByImdb => write!(f, "IMDb"),
            FilterType::ByViews => write!(f, "Views"),
        }
    }
}

// =============================================================================
// Taxonomy
// =============================================================================

/// Genre tag. Id 0 is reserved for "all genres".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    #[serde(default)]
    pub title: String,
}

impl Genre {
    pub const ALL_ID: u32 = 0;
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.title, self.id)
    }
}

/// Production country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.title, self.id)
    }
}

// =============================================================================
// Catalog Items
// =============================================================================

/// Anything with a display title. The eligibility filter reads this.
pub trait Titled {
    fn title(&self) -> &str;
}

/// Playable or downloadable source of a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: u64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub quality: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub url: String,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.quality, self.kind)?;
        if let Some(size) = &self.size {
            write!(f, " ({})", size)?;
        }
        write!(f, " {}", self.url)
    }
}

/// Movie record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub imdb: f32,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub country: Vec<Country>,
}

impl Titled for Movie {
    fn title(&self) -> &str {
        &self.title
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year.map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} - IMDb {:.1}", self.title, year_str, self.imdb)
    }
}

/// Series record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: u64,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub imdb: f32,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub country: Vec<Country>,
}

impl Titled for Series {
    fn title(&self) -> &str {
        &self.title
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year.map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} [Series] - IMDb {:.1}", self.title, year_str, self.imdb)
    }
}

/// Poster kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosterKind {
    #[default]
    Movie,
    Serie,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for PosterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PosterKind::Movie => write!(f, "Movie"),
            PosterKind::Serie => write!(f, "Series"),
            PosterKind::Unknown => write!(f, "?"),
        }
    }
}

/// Unified record returned by search and country listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poster {
    pub id: u64,
    #[serde(rename = "type", default)]
    pub kind: PosterKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub imdb: f32,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub country: Vec<Country>,
}

impl Titled for Poster {
    fn title(&self) -> &str {
        &self.title
    }
}

impl fmt::Display for Poster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year.map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} [{}]", self.title, year_str, self.kind)
    }
}
