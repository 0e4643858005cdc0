//! # Data Loader Crate
//!
//! This crate loads and indexes the film and book catalogs.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Film, CreditLink, Person, Credit, Book, CatalogIndex)
//! - **parser**: Parse the IMDb TSV dumps and the book CSV export into Rust structs
//! - **index**: Load a whole data directory into a `CatalogIndex`
//! - **error**: Error types for loading and lookups
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::CatalogIndex;
//! use std::path::Path;
//!
//! let index = CatalogIndex::load_from_files(Path::new("data"))?;
//!
//! let films = index.movies_by_title("Alice in Wonderland");
//! let rows = index.books_by_title_and_author("Alice in Wonderland", "Lewis Carroll");
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    FilmId,
    PersonId,
    Year,
    // Core types
    Film,
    WriterCredits,
    CreditLink,
    Person,
    Credit,
    Book,
    CatalogIndex,
    // Field rules
    parse_year,
    MISSING_MARKER,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_index_creation() {
        let index = CatalogIndex::new();
        let (films, persons, credits, books) = index.counts();

        assert_eq!(films, 0);
        assert_eq!(persons, 0);
        assert_eq!(credits, 0);
        assert_eq!(books, 0);
    }

    #[test]
    fn test_insert_film() {
        let mut index = CatalogIndex::new();

        index.insert_film(Film {
            id: "tt0004873".to_string(),
            title: "Alice in Wonderland".to_string(),
            title_type: "movie".to_string(),
            year: Some(1915),
            genres: ["Adventure", "Family", "Fantasy"]
                .into_iter()
                .map(String::from)
                .collect(),
        });

        let retrieved = index.get_film("tt0004873").unwrap();
        assert_eq!(retrieved.year, Some(1915));
        assert_eq!(retrieved.genres.len(), 3);
        assert!(retrieved.is_movie());
    }

    #[test]
    fn test_insert_credit() {
        let mut index = CatalogIndex::new();

        index.insert_credit(Credit {
            person_id: "nm0140902".to_string(),
            job: "novel \"Alice's Adventures in Wonderland\"".to_string(),
        });
        index.insert_credit(Credit {
            person_id: "nm0140902".to_string(),
            job: "writer".to_string(),
        });

        let credits = index.get_person_credits("nm0140902");
        assert_eq!(credits.len(), 2);
        assert!(credits[0].has_quote());
        assert!(!credits[1].has_quote());
    }

    #[test]
    fn test_empty_queries() {
        let index = CatalogIndex::new();

        // Querying non-existent data should return None or empty collections
        assert!(index.get_film("tt999").is_none());
        assert!(index.get_person("nm999").is_none());
        assert!(index.get_credit_link("tt999").is_none());
        assert!(index.get_person_credits("nm999").is_empty());
        assert!(index.movies_by_title("Nothing").is_empty());
        assert!(index.books_by_title_and_author("Nothing", "Nobody").is_empty());
        assert!(index.book_genre_vocabulary().is_empty());
    }
}
