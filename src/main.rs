use std::sync::Arc;

use flix_catalog::{
    api::{create_router, AppState},
    config::Config,
    services::providers::{LikedMoviesClient, TmdbProvider},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    let catalog = Arc::new(TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    ));
    let liked = Arc::new(LikedMoviesClient::new(config.liked_api_url.clone()));

    // Initialize application state
    let state = AppState::new(catalog, liked);

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        address = %address,
        tmdb_api_url = %config.tmdb_api_url,
        liked_api_url = %config.liked_api_url,
        "Server listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    // RUST_LOG overrides the default filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("flix_catalog=debug,tower_http=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
