use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod catalog;

pub use catalog::CatalogSnapshot;

/// TMDB genre identifier
pub type GenreId = u32;

/// TMDB movie / TV show identifier
pub type MovieId = u64;

/// A genre id → name mapping from the TMDB genre table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Kind of catalog content, used as a path segment in TMDB URLs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Tv,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Tv => "tv",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display-ready catalog entry handed to the UI
///
/// Only the normalizer builds these from raw TMDB records; the liked-movies
/// backend stores and returns them as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayEntry {
    pub id: MovieId,
    pub name: String,
    /// Backdrop path fragment, e.g. `/abc.jpg`. Never empty.
    pub image: String,
    /// At most three genre names
    #[serde(default)]
    pub genres: Vec<String>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from `GET /genre/movie/list`
#[derive(Debug, Clone, Deserialize)]
pub struct GenreListResponse {
    pub genres: Vec<Genre>,
}

/// One page of `GET /trending/...` or `GET /discover/...`
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsPage {
    pub results: Vec<RawCatalogRecord>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// A catalog record as TMDB returns it. Movies carry `original_title`,
/// TV shows carry `original_name`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCatalogRecord {
    pub id: MovieId,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    pub genre_ids: Vec<GenreId>,
}

impl RawCatalogRecord {
    pub fn display_name(&self) -> &str {
        self.original_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or(self.original_title.as_deref())
            .unwrap_or_default()
    }
}

// ============================================================================
// Liked-movies Backend Types
// ============================================================================

/// Response from both liked-movies endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct LikedMoviesResponse {
    pub movies: Vec<DisplayEntry>,
}

/// Body of `PUT /api/user/remove`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoveLikedRequest {
    pub email: String,
    pub movie_id: MovieId,
}
