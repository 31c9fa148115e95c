/// TMDB (The Movie Database) API v3 provider
///
/// Authentication is the `api_key` query parameter on every request.
use crate::{
    error::AppResult,
    models::{Genre, GenreListResponse, ResultsPage},
    services::providers::{read_json, CatalogQuery, CatalogSource},
};
use reqwest::Client as HttpClient;

const SERVICE: &str = "tmdb";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self::with_client(HttpClient::new(), api_key, api_url)
    }

    pub fn with_client(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Query parameters for a listing request, api key first
    fn listing_params(&self, query: &CatalogQuery, page: Option<u32>) -> Vec<(&'static str, String)> {
        let mut params = vec![("api_key", self.api_key.clone())];
        params.extend(query.filters());
        if let Some(page) = page {
            params.push(("page", page.to_string()));
        }
        params
    }
}

#[async_trait::async_trait]
impl CatalogSource for TmdbProvider {
    async fn fetch_genres(&self) -> AppResult<Vec<Genre>> {
        let url = format!("{}/genre/movie/list", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let body: GenreListResponse = read_json(SERVICE, response).await?;

        tracing::info!(
            genres = body.genres.len(),
            provider = SERVICE,
            "Genre table fetched"
        );

        Ok(body.genres)
    }

    async fn fetch_results(&self, query: &CatalogQuery, page: Option<u32>) -> AppResult<ResultsPage> {
        let url = format!("{}{}", self.api_url, query.path());
        let params = self.listing_params(query, page);

        tracing::debug!(url = %url, page = ?page, "TMDB request");

        let response = self.http_client.get(&url).query(&params).send().await?;
        let results: ResultsPage = read_json(SERVICE, response).await?;

        tracing::debug!(
            url = %url,
            page = ?page,
            results = results.results.len(),
            provider = SERVICE,
            "Results page fetched"
        );

        Ok(results)
    }

    fn name(&self) -> &'static str {
        SERVICE
    }
}
