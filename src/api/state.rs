use std::sync::Arc;

use crate::services::{
    providers::{CatalogSource, LikedMoviesBackend},
    CatalogStore,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: CatalogStore,
}

impl AppState {
    /// Creates application state around a fresh, empty catalog
    pub fn new(catalog: Arc<dyn CatalogSource>, liked: Arc<dyn LikedMoviesBackend>) -> Self {
        Self {
            store: CatalogStore::new(catalog, liked),
        }
    }
}
