use crate::{
    models::{DisplayEntry, RawCatalogRecord},
    services::genres::GenreIndex,
};

/// Turn raw TMDB records into display entries
///
/// Records without a backdrop are dropped. Input order is kept and ids are
/// not de-duplicated.
pub fn normalize(records: Vec<RawCatalogRecord>, genres: &GenreIndex<'_>) -> Vec<DisplayEntry> {
    records
        .into_iter()
        .filter_map(|record| normalize_record(record, genres))
        .collect()
}

fn normalize_record(record: RawCatalogRecord, genres: &GenreIndex<'_>) -> Option<DisplayEntry> {
    let image = record
        .backdrop_path
        .as_deref()
        .filter(|path| !path.is_empty())?
        .to_string();

    Some(DisplayEntry {
        id: record.id,
        name: record.display_name().to_string(),
        image,
        genres: genres.resolve(&record.genre_ids),
    })
}
