//! Core traits for the corpus filter.
//!
//! This module defines the BookFilter trait that lets the pipeline combine
//! independent selections over the book table.

use anyhow::Result;
use data_loader::CatalogIndex;
use std::collections::BTreeSet;

/// A selection of book titles from the catalog.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` so a pipeline can sit behind an `Arc` next to the catalog
/// - Filters select titles, not rows: the pipeline intersects title sets, so
///   two rows sharing a title can satisfy different filters
pub trait BookFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Select the titles (as stored) of every matching book row.
    fn select(&self, catalog: &CatalogIndex) -> Result<BTreeSet<String>>;
}
