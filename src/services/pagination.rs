use crate::{
    error::AppResult,
    models::{DisplayEntry, Genre},
    services::{
        genres::GenreIndex,
        normalizer::normalize,
        providers::{CatalogQuery, CatalogSource},
    },
};

/// Stop requesting pages once this many entries have accumulated
pub const TARGET_ENTRIES: usize = 60;

/// Exclusive upper bound on the page index, so at most 9 pages are requested
pub const PAGE_CEILING: u32 = 10;

/// Whether the endpoint is walked page by page or queried once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingMode {
    Paged,
    SingleShot,
}

/// Fetch and normalize entries for `query`
///
/// Pages are requested one after another. The result is not truncated, so it
/// can exceed [`TARGET_ENTRIES`] by up to one page. Any page failure aborts
/// the whole fetch with no partial result.
pub async fn fetch_entries(
    source: &dyn CatalogSource,
    query: &CatalogQuery,
    genres: &[Genre],
    mode: PagingMode,
) -> AppResult<Vec<DisplayEntry>> {
    let index = GenreIndex::new(genres);

    if mode == PagingMode::SingleShot {
        let page = source.fetch_results(query, None).await?;
        let entries = normalize(page.results, &index);
        tracing::debug!(
            provider = source.name(),
            path = %query.path(),
            entries = entries.len(),
            "Single-shot fetch completed"
        );
        return Ok(entries);
    }

    let mut entries = Vec::new();
    let mut page_number = 1;

    while entries.len() < TARGET_ENTRIES && page_number < PAGE_CEILING {
        let page = source.fetch_results(query, Some(page_number)).await?;
        entries.extend(normalize(page.results, &index));

        tracing::debug!(
            provider = source.name(),
            path = %query.path(),
            page = page_number,
            accumulated = entries.len(),
            "Page accumulated"
        );

        page_number += 1;
    }

    Ok(entries)
}
