//! Corpus filtering and similarity scoring for book recommendations.
//!
//! This crate provides:
//! - BookFilter trait and implementations for selecting books from the corpus
//! - FilterPipeline for intersecting filter selections
//! - SimilarityScorer for comparing a film with the books it adapts
//!
//! ## Architecture
//! Recommendations are built in stages:
//! 1. Filters select titles by genre (substring match) and publication year
//! 2. The pipeline intersects their selections
//! 3. For adaptations, the scorer compares genres and years with the film
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, SimilarityScorer};
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(GenreMembershipFilter::new(["Fantasy"]))
//!     .add_filter(YearRangeFilter::new(1800, 1900));
//! let titles = pipeline.apply(&catalog)?;
//!
//! let scorer = SimilarityScorer::new(catalog.clone());
//! let comparisons = scorer.compare_all(&film, &adapted_books);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod similarity;

// Re-export main types
pub use traits::BookFilter;
pub use filter_pipeline::FilterPipeline;
pub use filters::{books_by_genre_membership, books_in_year_range};
pub use similarity::{
    best_match, genre_similarity, max_known_gap, year_gap, BookComparison, BookProfile,
    GenreSimilarity, SimilarityScorer,
};
