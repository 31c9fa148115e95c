use std::{collections::BTreeMap, fmt::Display, future::Future, sync::Arc};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogSnapshot, ContentType, Genre, GenreId, MovieId},
    services::{
        pagination::{fetch_entries, PagingMode},
        providers::{CatalogQuery, CatalogSource, LikedMoviesBackend},
    },
};

/// The store's operation families
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    LoadGenres,
    FetchTrending,
    FetchByGenre,
    FetchLiked,
    RemoveLiked,
}

impl OperationKind {
    pub const ALL: [OperationKind; 5] = [
        OperationKind::LoadGenres,
        OperationKind::FetchTrending,
        OperationKind::FetchByGenre,
        OperationKind::FetchLiked,
        OperationKind::RemoveLiked,
    ];
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OperationKind::LoadGenres => "load_genres",
            OperationKind::FetchTrending => "fetch_trending",
            OperationKind::FetchByGenre => "fetch_by_genre",
            OperationKind::FetchLiked => "fetch_liked",
            OperationKind::RemoveLiked => "remove_liked",
        };
        f.write_str(name)
    }
}

/// Latest state of an operation family: idle → pending → fulfilled | rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OperationStatus {
    Idle,
    Pending,
    Fulfilled,
    Rejected { error: String },
}

struct StoreInner {
    catalog: Arc<dyn CatalogSource>,
    liked: Arc<dyn LikedMoviesBackend>,
    snapshot: RwLock<Arc<CatalogSnapshot>>,
    operations: RwLock<BTreeMap<OperationKind, OperationStatus>>,
}

/// Process-wide catalog state container
///
/// Operations of different kinds may run concurrently. Each one reads what it
/// needs at start, performs its I/O without holding any lock, and on success
/// commits a new snapshot that replaces exactly one field. When two commits
/// race, the later one wins; `version` shows the order they landed in.
/// A rejected operation commits nothing.
#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<StoreInner>,
}

impl CatalogStore {
    pub fn new(catalog: Arc<dyn CatalogSource>, liked: Arc<dyn LikedMoviesBackend>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                catalog,
                liked,
                snapshot: RwLock::new(Arc::new(CatalogSnapshot::empty())),
                operations: RwLock::new(
                    OperationKind::ALL
                        .into_iter()
                        .map(|kind| (kind, OperationStatus::Idle))
                        .collect(),
                ),
            }),
        }
    }

    /// Current committed snapshot
    pub async fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.inner.snapshot.read().await.clone()
    }

    /// Latest status of every operation family
    pub async fn operations(&self) -> BTreeMap<OperationKind, OperationStatus> {
        self.inner.operations.read().await.clone()
    }

    pub async fn operation_status(&self, kind: OperationKind) -> OperationStatus {
        self.inner
            .operations
            .read()
            .await
            .get(&kind)
            .cloned()
            .unwrap_or(OperationStatus::Idle)
    }

    /// Fetch the genre table and replace `genres`
    #[instrument(skip(self))]
    pub async fn load_genres(&self) -> AppResult<Arc<CatalogSnapshot>> {
        self.track(OperationKind::LoadGenres, async {
            let genres = self.inner.catalog.fetch_genres().await?;
            Ok::<_, AppError>(self.commit(|current| current.with_genres(genres)).await)
        })
        .await
    }

    /// Walk the weekly trending listing and replace `movies`
    #[instrument(skip(self))]
    pub async fn fetch_trending(&self, content_type: ContentType) -> AppResult<Arc<CatalogSnapshot>> {
        self.track(OperationKind::FetchTrending, async {
            let genres = self.genres_for_fetch(OperationKind::FetchTrending).await;
            let query = CatalogQuery::Trending { content_type };
            let movies = fetch_entries(
                self.inner.catalog.as_ref(),
                &query,
                &genres,
                PagingMode::Paged,
            )
            .await?;
            Ok::<_, AppError>(self.commit(|current| current.with_movies(movies)).await)
        })
        .await
    }

    /// Query the discover listing for one genre and replace `movies`
    ///
    /// Discover is requested once, without a page parameter.
    #[instrument(skip(self))]
    pub async fn fetch_by_genre(
        &self,
        genre: GenreId,
        content_type: ContentType,
    ) -> AppResult<Arc<CatalogSnapshot>> {
        self.track(OperationKind::FetchByGenre, async {
            let genres = self.genres_for_fetch(OperationKind::FetchByGenre).await;
            let query = CatalogQuery::Discover {
                content_type,
                genre,
            };
            let movies = fetch_entries(
                self.inner.catalog.as_ref(),
                &query,
                &genres,
                PagingMode::SingleShot,
            )
            .await?;
            Ok::<_, AppError>(self.commit(|current| current.with_movies(movies)).await)
        })
        .await
    }

    /// Load a user's liked list into `movies`
    #[instrument(skip(self, email))]
    pub async fn fetch_liked(&self, email: &str) -> AppResult<Arc<CatalogSnapshot>> {
        self.track(OperationKind::FetchLiked, async {
            let email = validate_email(email)?;
            let movies = self.inner.liked.fetch_liked(email).await?;
            Ok::<_, AppError>(self.commit(|current| current.with_movies(movies)).await)
        })
        .await
    }

    /// Remove one movie from a user's liked list; the remaining list replaces `movies`
    #[instrument(skip(self, email))]
    pub async fn remove_liked(&self, email: &str, movie_id: MovieId) -> AppResult<Arc<CatalogSnapshot>> {
        self.track(OperationKind::RemoveLiked, async {
            let email = validate_email(email)?;
            let movies = self.inner.liked.remove_liked(email, movie_id).await?;
            Ok::<_, AppError>(self.commit(|current| current.with_movies(movies)).await)
        })
        .await
    }

    /// Run `operation`, recording its pending and final status
    async fn track<T, F>(&self, kind: OperationKind, operation: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        self.set_status(kind, OperationStatus::Pending).await;

        match operation.await {
            Ok(value) => {
                self.set_status(kind, OperationStatus::Fulfilled).await;
                tracing::info!(operation = %kind, "Operation fulfilled");
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(operation = %kind, error = %e, "Operation rejected");
                self.set_status(
                    kind,
                    OperationStatus::Rejected {
                        error: e.to_string(),
                    },
                )
                .await;
                Err(e)
            }
        }
    }

    async fn set_status(&self, kind: OperationKind, status: OperationStatus) {
        self.inner.operations.write().await.insert(kind, status);
    }

    /// Replace the snapshot with one derived from the latest committed state
    async fn commit<F>(&self, next: F) -> Arc<CatalogSnapshot>
    where
        F: FnOnce(&CatalogSnapshot) -> CatalogSnapshot,
    {
        let mut slot = self.inner.snapshot.write().await;
        let current: &CatalogSnapshot = &slot;
        let snapshot = Arc::new(next(current));
        *slot = snapshot.clone();

        tracing::debug!(
            version = snapshot.version,
            movies = snapshot.movies.len(),
            genres = snapshot.genres.len(),
            "Catalog snapshot committed"
        );

        snapshot
    }

    /// Genre table as of operation start
    async fn genres_for_fetch(&self, kind: OperationKind) -> Vec<Genre> {
        let snapshot = self.snapshot().await;
        if !snapshot.genres_loaded {
            tracing::warn!(
                operation = %kind,
                "Genres not loaded yet, entries will carry no genre names"
            );
        }
        snapshot.genres.clone()
    }
}

fn validate_email(email: &str) -> AppResult<&str> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::InvalidInput("email must not be empty".to_string()));
    }
    Ok(email)
}
