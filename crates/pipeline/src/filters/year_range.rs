//! Filter for a publication-year window.

use crate::traits::BookFilter;
use anyhow::Result;
use data_loader::{CatalogIndex, Year};
use std::collections::BTreeSet;

/// Titles (as stored) of every book published in `[start, end]`.
///
/// Books with a missing or non-numeric year are never selected.
pub fn books_in_year_range(catalog: &CatalogIndex, start: Year, end: Year) -> BTreeSet<String> {
    catalog
        .books()
        .iter()
        .filter(|book| book.year.is_some_and(|year| start <= year && year <= end))
        .map(|book| book.title.clone())
        .collect()
}

/// Keeps books whose publication year lies in an inclusive window.
pub struct YearRangeFilter {
    start: Year,
    end: Year,
}

impl YearRangeFilter {
    /// Create a new YearRangeFilter for `[start, end]`.
    pub fn new(start: Year, end: Year) -> Self {
        Self { start, end }
    }

    /// Window of `tolerance` years either side of `center`, clamped to the
    /// representable years
    pub fn around(center: Year, tolerance: u32) -> Self {
        let tolerance = Year::try_from(tolerance).unwrap_or(Year::MAX);
        Self::new(
            center.saturating_sub(tolerance),
            center.saturating_add(tolerance),
        )
    }

    pub fn bounds(&self) -> (Year, Year) {
        (self.start, self.end)
    }
}

impl BookFilter for YearRangeFilter {
    fn name(&self) -> &str {
        "YearRangeFilter"
    }

    fn select(&self, catalog: &CatalogIndex) -> Result<BTreeSet<String>> {
        Ok(books_in_year_range(catalog, self.start, self.end))
    }
}
