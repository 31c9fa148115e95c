/// Remote catalog clients
///
/// The store talks to two external services: the TMDB catalog (genres,
/// trending, discover) and the liked-movies backend. Each sits behind a trait
/// so the store and fetch loop can be driven by fakes in tests.
use crate::{
    error::{AppError, AppResult},
    models::{ContentType, DisplayEntry, Genre, GenreId, MovieId, ResultsPage},
};
use serde::de::DeserializeOwned;

pub mod liked;
pub mod tmdb;

pub use liked::LikedMoviesClient;
pub use tmdb::TmdbProvider;

/// A TMDB listing endpoint together with its filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogQuery {
    /// `GET /trending/{type}/week`
    Trending { content_type: ContentType },
    /// `GET /discover/{type}?with_genres={genre}`
    Discover {
        content_type: ContentType,
        genre: GenreId,
    },
}

impl CatalogQuery {
    /// Path relative to the TMDB base URL
    pub fn path(&self) -> String {
        match self {
            CatalogQuery::Trending { content_type } => format!("/trending/{}/week", content_type),
            CatalogQuery::Discover { content_type, .. } => format!("/discover/{}", content_type),
        }
    }

    /// Filter parameters, excluding the api key and page number
    pub fn filters(&self) -> Vec<(&'static str, String)> {
        match self {
            CatalogQuery::Trending { .. } => Vec::new(),
            CatalogQuery::Discover { genre, .. } => vec![("with_genres", genre.to_string())],
        }
    }
}

/// Source of catalog metadata
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full movie genre table
    async fn fetch_genres(&self) -> AppResult<Vec<Genre>>;

    /// Fetch one page of results. `None` issues the request without a page
    /// parameter, leaving the upstream default (page 1).
    async fn fetch_results(&self, query: &CatalogQuery, page: Option<u32>) -> AppResult<ResultsPage>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Per-user liked-movies storage
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LikedMoviesBackend: Send + Sync {
    async fn fetch_liked(&self, email: &str) -> AppResult<Vec<DisplayEntry>>;

    /// Remove a movie and return the user's remaining liked list
    async fn remove_liked(&self, email: &str, movie_id: MovieId) -> AppResult<Vec<DisplayEntry>>;
}

/// Check the status of an upstream response and decode its body
///
/// Non-2xx becomes `ExternalApi`; a body that does not match `T` becomes
/// `Decode` rather than being patched over with defaults.
pub(crate) async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: reqwest::Response,
) -> AppResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            service = service,
            status = %status,
            body = %body,
            "Upstream request failed"
        );
        return Err(AppError::ExternalApi {
            service,
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        tracing::error!(
            service = service,
            error = %e,
            response = %text,
            "Failed to deserialize upstream response"
        );
        AppError::Decode {
            service,
            message: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trending_query_path() {
        let query = CatalogQuery::Trending {
            content_type: ContentType::Tv,
        };
        assert_eq!(query.path(), "/trending/tv/week");
        assert!(query.filters().is_empty());
    }

    #[test]
    fn test_discover_query_path_and_filters() {
        let query = CatalogQuery::Discover {
            content_type: ContentType::Movie,
            genre: 28,
        };
        assert_eq!(query.path(), "/discover/movie");
        assert_eq!(query.filters(), vec![("with_genres", "28".to_string())]);
    }
}
