//! Filter implementations for the corpus filter.
//!
//! This module contains the concrete filters that can be composed into a
//! FilterPipeline, and the plain selection functions behind them.

pub mod genre_membership;
pub mod year_range;

// Re-export for convenience
pub use genre_membership::{books_by_genre_membership, GenreMembershipFilter};
pub use year_range::{books_in_year_range, YearRangeFilter};
