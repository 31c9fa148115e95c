use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    models::{CatalogSnapshot, ContentType, DisplayEntry, Genre, GenreId, RemoveLikedRequest},
    services::{OperationKind, OperationStatus},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct TrendingRequest {
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

#[derive(Debug, Deserialize)]
pub struct DiscoverRequest {
    pub genre: GenreId,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenresResponse {
    pub genres: Vec<Genre>,
    pub genres_loaded: bool,
    pub version: u64,
}

impl From<&CatalogSnapshot> for GenresResponse {
    fn from(snapshot: &CatalogSnapshot) -> Self {
        Self {
            genres: snapshot.genres.clone(),
            genres_loaded: snapshot.genres_loaded,
            version: snapshot.version,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub movies: Vec<DisplayEntry>,
    pub version: u64,
}

impl From<&CatalogSnapshot> for MoviesResponse {
    fn from(snapshot: &CatalogSnapshot) -> Self {
        Self {
            movies: snapshot.movies.clone(),
            version: snapshot.version,
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Current catalog snapshot
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogSnapshot> {
    let snapshot = state.store.snapshot().await;
    Json(CatalogSnapshot::clone(&snapshot))
}

/// Latest status of each store operation
pub async fn get_operations(
    State(state): State<AppState>,
) -> Json<BTreeMap<OperationKind, OperationStatus>> {
    Json(state.store.operations().await)
}

/// Load the genre table
pub async fn load_genres(State(state): State<AppState>) -> AppResult<Json<GenresResponse>> {
    let snapshot = state.store.load_genres().await?;
    Ok(Json(GenresResponse::from(snapshot.as_ref())))
}

/// Replace the movie list with this week's trending titles
pub async fn fetch_trending(
    State(state): State<AppState>,
    Json(request): Json<TrendingRequest>,
) -> AppResult<Json<MoviesResponse>> {
    let snapshot = state.store.fetch_trending(request.content_type).await?;
    Ok(Json(MoviesResponse::from(snapshot.as_ref())))
}

/// Replace the movie list with titles from one genre
pub async fn fetch_by_genre(
    State(state): State<AppState>,
    Json(request): Json<DiscoverRequest>,
) -> AppResult<Json<MoviesResponse>> {
    let snapshot = state
        .store
        .fetch_by_genre(request.genre, request.content_type)
        .await?;
    Ok(Json(MoviesResponse::from(snapshot.as_ref())))
}

/// Replace the movie list with a user's liked movies
pub async fn get_liked(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<MoviesResponse>> {
    let snapshot = state.store.fetch_liked(&email).await?;
    Ok(Json(MoviesResponse::from(snapshot.as_ref())))
}

/// Remove a liked movie; the movie list becomes the remaining liked movies
pub async fn remove_liked(
    State(state): State<AppState>,
    Json(request): Json<RemoveLikedRequest>,
) -> AppResult<Json<MoviesResponse>> {
    let snapshot = state
        .store
        .remove_liked(&request.email, request.movie_id)
        .await?;
    Ok(Json(MoviesResponse::from(snapshot.as_ref())))
}
