//! The FilterPipeline combines multiple book filters.
//!
//! This module provides the FilterPipeline struct that chains filters
//! together using the builder pattern and intersects their selections.

use crate::traits::BookFilter;
use anyhow::Result;
use data_loader::CatalogIndex;
use std::collections::BTreeSet;
use tracing;

/// Intersects the title sets selected by several filters.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(GenreMembershipFilter::new(["Fantasy"]))
///     .add_filter(YearRangeFilter::new(1800, 1900));
///
/// let titles = pipeline.apply(&catalog)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn BookFilter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl BookFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply every filter and intersect the results.
    ///
    /// An empty pipeline selects every stored title. Once the running
    /// intersection is empty the remaining filters are skipped.
    pub fn apply(&self, catalog: &CatalogIndex) -> Result<BTreeSet<String>> {
        let mut current: Option<BTreeSet<String>> = None;
        for filter in &self.filters {
            if current.as_ref().is_some_and(BTreeSet::is_empty) {
                tracing::debug!("Skipping filter {}: nothing left to intersect", filter.name());
                continue;
            }
            let selected = filter.select(catalog)?;
            tracing::debug!(
                "Filter {} selected {} titles",
                filter.name(),
                selected.len()
            );
            current = Some(match current {
                None => selected,
                Some(previous) => previous.intersection(&selected).cloned().collect(),
            });
            tracing::debug!(
                "Titles remaining after {}: {}",
                filter.name(),
                current.as_ref().map_or(0, BTreeSet::len)
            );
        }

        Ok(current.unwrap_or_else(|| {
            catalog
                .books()
                .iter()
                .map(|book| book.title.clone())
                .collect()
        }))
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{GenreMembershipFilter, YearRangeFilter};
    use data_loader::Book;

    fn create_test_index() -> CatalogIndex {
        let mut index = CatalogIndex::new();
        for (title, genre, year) in [
            ("Dracula", Some("Horror ; Fiction"), Some(1897)),
            ("Frankenstein", Some("Horror"), Some(1818)),
            ("Emma", Some("Romance"), Some(1815)),
        ] {
            index.insert_book(Book {
                title: title.to_string(),
                author: None,
                genre: genre.map(String::from),
                year,
            });
        }
        index
    }

    #[test]
    fn test_empty_pipeline() {
        let index = create_test_index();
        let pipeline = FilterPipeline::new();

        let titles = pipeline.apply(&index).unwrap();
        assert_eq!(titles.len(), 3);
    }

    #[test]
    fn test_single_filter() {
        let index = create_test_index();
        let pipeline = FilterPipeline::new().add_filter(YearRangeFilter::new(1800, 1820));

        let titles = pipeline.apply(&index).unwrap();
        assert_eq!(
            titles.into_iter().collect::<Vec<_>>(),
            vec!["Emma".to_string(), "Frankenstein".to_string()]
        );
    }

    #[test]
    fn test_filters_intersect() {
        let index = create_test_index();
        let pipeline = FilterPipeline::new()
            .add_filter(GenreMembershipFilter::new(["Horror"]))
            .add_filter(YearRangeFilter::new(1800, 1820));

        let titles = pipeline.apply(&index).unwrap();
        assert_eq!(titles.into_iter().collect::<Vec<_>>(), vec!["Frankenstein".to_string()]);
    }

    #[test]
    fn test_intersection_is_over_titles_not_rows() {
        let mut index = CatalogIndex::new();
        // Same title: one row carries the genre, the other the year
        index.insert_book(Book {
            title: "Carmilla".to_string(),
            author: None,
            genre: Some("Horror".to_string()),
            year: None,
        });
        index.insert_book(Book {
            title: "Carmilla".to_string(),
            author: None,
            genre: None,
            year: Some(1872),
        });

        let pipeline = FilterPipeline::new()
            .add_filter(GenreMembershipFilter::new(["Horror"]))
            .add_filter(YearRangeFilter::new(1870, 1875));

        assert!(pipeline.apply(&index).unwrap().contains("Carmilla"));
    }
}
