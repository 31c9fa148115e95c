//! Real HTTP round trips for the TMDB and liked-movies clients, served by a
//! throwaway local axum app.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};

use flix_catalog::{
    error::AppError,
    models::{ContentType, RemoveLikedRequest},
    services::providers::{
        CatalogQuery, CatalogSource, LikedMoviesBackend, LikedMoviesClient, TmdbProvider,
    },
};

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", address)
}

fn tmdb_app() -> Router {
    Router::new()
        .route(
            "/3/genre/movie/list",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("api_key").map(String::as_str) != Some("good_key") {
                    return (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "status_message": "Invalid API key" })),
                    );
                }
                (
                    StatusCode::OK,
                    Json(json!({ "genres": [ { "id": 28, "name": "Action" } ] })),
                )
            }),
        )
        .route(
            "/3/trending/:kind/week",
            get(
                |Path(kind): Path<String>, Query(params): Query<HashMap<String, String>>| async move {
                    let page: u64 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
                    Json(json!({
                        "page": page,
                        "total_pages": 3,
                        "results": [ {
                            "id": page,
                            "original_name": format!("{} {}", kind, page),
                            "backdrop_path": "/b.jpg",
                            "genre_ids": [28]
                        } ]
                    }))
                },
            ),
        )
        .route(
            "/3/discover/:kind",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let filtered = params.get("with_genres").map(String::as_str) == Some("16")
                    && !params.contains_key("page");
                if !filtered {
                    return (StatusCode::BAD_REQUEST, Json(json!({ "status_message": "bad filter" })));
                }
                (
                    StatusCode::OK,
                    Json(json!({
                        "results": [
                            { "id": 12, "original_title": "Toy Story", "backdrop_path": "/ts.jpg", "genre_ids": [16] }
                        ]
                    })),
                )
            }),
        )
}

#[tokio::test]
async fn test_tmdb_genres_and_trending() {
    let base = spawn(tmdb_app()).await;
    let provider = TmdbProvider::new("good_key".to_string(), format!("{}/3", base));

    let genres = provider.fetch_genres().await.unwrap();
    assert_eq!(genres.len(), 1);
    assert_eq!(genres[0].name, "Action");

    let query = CatalogQuery::Trending {
        content_type: ContentType::Tv,
    };
    let page = provider.fetch_results(&query, Some(2)).await.unwrap();
    assert_eq!(page.page, Some(2));
    assert_eq!(page.total_pages, Some(3));
    assert_eq!(page.results[0].display_name(), "tv 2");
}

#[tokio::test]
async fn test_tmdb_non_success_status() {
    let base = spawn(tmdb_app()).await;
    let provider = TmdbProvider::new("bad_key".to_string(), format!("{}/3", base));

    let err = provider.fetch_genres().await.unwrap_err();
    match err {
        AppError::ExternalApi { status, body, .. } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_tmdb_discover_sends_genre_filter() {
    let base = spawn(tmdb_app()).await;
    let provider = TmdbProvider::new("good_key".to_string(), format!("{}/3", base));

    let query = CatalogQuery::Discover {
        content_type: ContentType::Movie,
        genre: 16,
    };
    let page = provider.fetch_results(&query, None).await.unwrap();
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].display_name(), "Toy Story");
    assert_eq!(page.page, None);
}

#[tokio::test]
async fn test_tmdb_shape_mismatch_is_decode_error() {
    let app = Router::new().route(
        "/trending/movie/week",
        get(|| async { Json(json!({ "items": [] })) }),
    );
    let base = spawn(app).await;
    let provider = TmdbProvider::new("key".to_string(), base);

    let query = CatalogQuery::Trending {
        content_type: ContentType::Movie,
    };
    let err = provider.fetch_results(&query, Some(1)).await.unwrap_err();
    assert!(matches!(err, AppError::Decode { service: "tmdb", .. }));
}

#[tokio::test]
async fn test_transport_failure_is_http_client_error() {
    // nothing listens on this port once the listener is dropped
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let provider = TmdbProvider::new("key".to_string(), format!("http://{}", address));
    let err = provider.fetch_genres().await.unwrap_err();
    assert!(matches!(err, AppError::HttpClient(_)));
}

fn liked_app() -> Router {
    Router::new()
        .route(
            "/api/user/liked/:email",
            get(|Path(email): Path<String>| async move {
                Json(json!({
                    "movies": [
                        { "id": 1, "name": format!("liked by {}", email), "image": "/1.jpg", "genres": ["Drama"] },
                        { "id": 2, "name": "Second", "image": "/2.jpg", "genres": [] }
                    ]
                }))
            }),
        )
        .route(
            "/api/user/remove",
            put(|Json(body): Json<Value>| async move {
                let request: RemoveLikedRequest = serde_json::from_value(body).unwrap();
                let remaining: Vec<Value> = [1u64, 2]
                    .into_iter()
                    .filter(|id| *id != request.movie_id)
                    .map(|id| json!({ "id": id, "name": request.email, "image": "/x.jpg" }))
                    .collect();
                Json(json!({ "movies": remaining }))
            }),
        )
}

#[tokio::test]
async fn test_liked_round_trip() {
    let base = spawn(liked_app()).await;
    let client = LikedMoviesClient::new(base);

    let movies = client.fetch_liked("user@example.com").await.unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].name, "liked by user@example.com");

    let remaining = client.remove_liked("user@example.com", 1).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, 2);
    assert_eq!(remaining[0].name, "user@example.com");
}
