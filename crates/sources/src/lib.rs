//! # Sources Crate
//!
//! Resolves the literary sources of a film: the books it adapts.
//!
//! ## Components
//!
//! ### Quoted-title lexer
//! Splits free-text job descriptions such as
//! `novel "Alice's Adventures in Wonderland"` into plain and quoted segments.
//!
//! ### Adaptation Source
//! Follows a film's writer credits to the writers' other credits and
//! collects every quoted title as an `(title, writer name)` pair.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::AdaptationSource;
//! use data_loader::CatalogIndex;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(CatalogIndex::load_from_files("data".as_ref())?);
//! let source = AdaptationSource::new(catalog.clone());
//!
//! for book in source.resolve_adaptations("tt0004873")? {
//!     println!("{}", book);
//! }
//! ```

// Public modules
pub mod types;
pub mod quoted;
pub mod adaptation;

// Re-export commonly used types
pub use types::AdaptedBook;
pub use quoted::{quoted_titles, segments, Segment};
pub use adaptation::AdaptationSource;
