//! Filter for books tagged with any of a set of genres.
//!
//! Matching is a substring test against the raw, delimiter-joined genre
//! field: "Fiction" selects "Science Fiction" books too.

use crate::traits::BookFilter;
use anyhow::Result;
use data_loader::CatalogIndex;
use std::collections::BTreeSet;

/// Titles (as stored) of every book whose genre text contains at least one
/// of the tokens.
pub fn books_by_genre_membership<S: AsRef<str>>(
    catalog: &CatalogIndex,
    genres: &[S],
) -> BTreeSet<String> {
    catalog
        .books()
        .iter()
        .filter(|book| genres.iter().any(|genre| book.genre_contains(genre.as_ref())))
        .map(|book| book.title.clone())
        .collect()
}

/// Keeps books that mention any requested genre token.
pub struct GenreMembershipFilter {
    genres: Vec<String>,
}

impl GenreMembershipFilter {
    /// Create a new GenreMembershipFilter.
    pub fn new<I, S>(genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            genres: genres.into_iter().map(Into::into).collect(),
        }
    }
}

impl BookFilter for GenreMembershipFilter {
    fn name(&self) -> &str {
        "GenreMembershipFilter"
    }

    fn select(&self, catalog: &CatalogIndex) -> Result<BTreeSet<String>> {
        Ok(books_by_genre_membership(catalog, &self.genres))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Book;

    fn create_test_index() -> CatalogIndex {
        let mut index = CatalogIndex::new();
        for (title, genre) in [
            ("Dune", Some("Science Fiction")),
            ("Emma", Some("Fiction ; Romance")),
            ("The Hobbit", Some("Fantasy ; Children's fiction")),
            ("Atlas of the World", None),
        ] {
            index.insert_book(Book {
                title: title.to_string(),
                author: None,
                genre: genre.map(String::from),
                year: None,
            });
        }
        index
    }

    #[test]
    fn test_substring_semantics() {
        let index = create_test_index();

        let titles = books_by_genre_membership(&index, &["Fiction"]);
        assert!(titles.contains("Dune"));
        assert!(titles.contains("Emma"));
        // "Children's fiction" is lowercase: substring matching is case-sensitive
        assert!(!titles.contains("The Hobbit"));
    }

    #[test]
    fn test_union_across_genres() {
        let index = create_test_index();

        let titles = books_by_genre_membership(&index, &["Fantasy", "Romance"]);
        assert_eq!(
            titles.into_iter().collect::<Vec<_>>(),
            vec!["Emma".to_string(), "The Hobbit".to_string()]
        );
    }

    #[test]
    fn test_no_genres_selects_nothing() {
        let index = create_test_index();
        let none: [&str; 0] = [];
        assert!(books_by_genre_membership(&index, &none).is_empty());
    }

    #[test]
    fn test_filter_wraps_selection() {
        let index = create_test_index();
        let filter = GenreMembershipFilter::new(["Fantasy"]);

        assert_eq!(filter.name(), "GenreMembershipFilter");
        let titles = filter.select(&index).unwrap();
        assert_eq!(titles.len(), 1);
        assert!(titles.contains("The Hobbit"));
    }
}
