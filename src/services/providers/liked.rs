/// Liked-movies backend client
///
/// The backend already stores display-ready entries, so its responses pass
/// through without normalization.
use crate::{
    error::{AppError, AppResult},
    models::{DisplayEntry, LikedMoviesResponse, MovieId, RemoveLikedRequest},
    services::providers::{read_json, LikedMoviesBackend},
};
use reqwest::{Client as HttpClient, Url};

const SERVICE: &str = "liked-movies";

#[derive(Clone)]
pub struct LikedMoviesClient {
    http_client: HttpClient,
    api_url: String,
}

impl LikedMoviesClient {
    pub fn new(api_url: String) -> Self {
        Self::with_client(HttpClient::new(), api_url)
    }

    pub fn with_client(http_client: HttpClient, api_url: String) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// The email becomes a single percent-encoded path segment
    fn liked_url(&self, email: &str) -> AppResult<Url> {
        let invalid = || AppError::Internal(format!("Invalid liked-movies URL: {}", self.api_url));

        let mut url = Url::parse(&self.api_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["api", "user", "liked", email]);
        Ok(url)
    }

    fn remove_url(&self) -> String {
        format!("{}/api/user/remove", self.api_url)
    }
}

#[async_trait::async_trait]
impl LikedMoviesBackend for LikedMoviesClient {
    async fn fetch_liked(&self, email: &str) -> AppResult<Vec<DisplayEntry>> {
        let response = self.http_client.get(self.liked_url(email)?).send().await?;
        let body: LikedMoviesResponse = read_json(SERVICE, response).await?;

        tracing::info!(
            movies = body.movies.len(),
            provider = SERVICE,
            "Liked movies fetched"
        );

        Ok(body.movies)
    }

    async fn remove_liked(&self, email: &str, movie_id: MovieId) -> AppResult<Vec<DisplayEntry>> {
        let request = RemoveLikedRequest {
            email: email.to_string(),
            movie_id,
        };

        let response = self
            .http_client
            .put(self.remove_url())
            .json(&request)
            .send()
            .await?;
        let body: LikedMoviesResponse = read_json(SERVICE, response).await?;

        tracing::info!(
            movie_id = movie_id,
            remaining = body.movies.len(),
            provider = SERVICE,
            "Liked movie removed"
        );

        Ok(body.movies)
    }
}
