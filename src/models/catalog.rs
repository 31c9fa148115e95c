use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{DisplayEntry, Genre};

/// Immutable view of the catalog at one commit
///
/// Each successful store operation produces a new snapshot with `version`
/// one higher than the snapshot it replaced. Fields are always replaced whole.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub movies: Vec<DisplayEntry>,
    pub genres_loaded: bool,
    pub genres: Vec<Genre>,
    pub version: u64,
    pub updated_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Session start: nothing loaded yet
    pub fn empty() -> Self {
        Self {
            movies: Vec::new(),
            genres_loaded: false,
            genres: Vec::new(),
            version: 0,
            updated_at: Utc::now(),
        }
    }

    /// Next snapshot with the genre table replaced
    ///
    /// `genres_loaded` tracks whether the table is non-empty, so an empty
    /// upstream table leaves the flag false.
    pub fn with_genres(&self, genres: Vec<Genre>) -> Self {
        Self {
            movies: self.movies.clone(),
            genres_loaded: !genres.is_empty(),
            genres,
            version: self.version + 1,
            updated_at: Utc::now(),
        }
    }

    /// Next snapshot with the movie list replaced
    pub fn with_movies(&self, movies: Vec<DisplayEntry>) -> Self {
        Self {
            movies,
            genres_loaded: self.genres_loaded,
            genres: self.genres.clone(),
            version: self.version + 1,
            updated_at: Utc::now(),
        }
    }
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action() -> Genre {
        Genre {
            id: 28,
            name: "Action".to_string(),
        }
    }

    #[test]
    fn test_with_genres_sets_loaded_flag() {
        let snapshot = CatalogSnapshot::empty().with_genres(vec![action()]);
        assert!(snapshot.genres_loaded);
        assert_eq!(snapshot.version, 1);
    }

    #[test]
    fn test_empty_genre_table_is_not_loaded() {
        let snapshot = CatalogSnapshot::empty().with_genres(Vec::new());
        assert!(!snapshot.genres_loaded);
    }

    #[test]
    fn test_with_movies_keeps_genres() {
        let entry = DisplayEntry {
            id: 1,
            name: "Heat".to_string(),
            image: "/heat.jpg".to_string(),
            genres: vec!["Action".to_string()],
        };
        let snapshot = CatalogSnapshot::empty()
            .with_genres(vec![action()])
            .with_movies(vec![entry.clone()]);

        assert_eq!(snapshot.movies, vec![entry]);
        assert_eq!(snapshot.genres, vec![action()]);
        assert!(snapshot.genres_loaded);
        assert_eq!(snapshot.version, 2);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(CatalogSnapshot::empty()).unwrap();
        assert_eq!(json["genresLoaded"], false);
        assert!(json["updatedAt"].is_string());
    }
}
