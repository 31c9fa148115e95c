use std::collections::HashMap;

use crate::models::{Genre, GenreId};

/// Maximum number of genre names kept per entry
pub const MAX_GENRES_PER_ENTRY: usize = 3;

/// Lookup from genre id to name over a loaded genre table
///
/// If the table repeats an id, the first name wins.
#[derive(Debug, Clone, Default)]
pub struct GenreIndex<'a> {
    names: HashMap<GenreId, &'a str>,
}

impl<'a> GenreIndex<'a> {
    pub fn new(genres: &'a [Genre]) -> Self {
        let mut names = HashMap::with_capacity(genres.len());
        for genre in genres {
            names.entry(genre.id).or_insert(genre.name.as_str());
        }
        Self { names }
    }

    pub fn name(&self, id: GenreId) -> Option<&'a str> {
        self.names.get(&id).copied()
    }

    /// Resolve ids to names in input order, skipping unknown ids and keeping
    /// at most [`MAX_GENRES_PER_ENTRY`] names.
    pub fn resolve(&self, genre_ids: &[GenreId]) -> Vec<String> {
        genre_ids
            .iter()
            .filter_map(|id| self.name(*id))
            .take(MAX_GENRES_PER_ENTRY)
            .map(str::to_string)
            .collect()
    }
}

/// Resolve a record's genre ids against the loaded genre table
pub fn resolve_genres(genre_ids: &[GenreId], genres: &[Genre]) -> Vec<String> {
    GenreIndex::new(genres).resolve(genre_ids)
}
