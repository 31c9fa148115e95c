use axum::{
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{
    make_span_with_request_id, propagate_request_id_layer, set_request_id_layer,
};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(propagate_request_id_layer()),
        )
        .layer(CorsLayer::permissive())
}

/// Store operations under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(handlers::get_catalog))
        .route("/operations", get(handlers::get_operations))
        .route("/genres", post(handlers::load_genres))
        .route("/trending", post(handlers::fetch_trending))
        .route("/discover", post(handlers::fetch_by_genre))
        // Liked movies
        .route("/liked/remove", put(handlers::remove_liked))
        .route("/liked/:email", get(handlers::get_liked))
}
