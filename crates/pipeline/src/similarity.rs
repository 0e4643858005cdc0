//! Genre and time similarity between a film and a book.
//!
//! A book named by the adaptation resolver can match several catalog rows
//! (editions, reprints). Two aggregation policies turn those rows into a
//! single `BookProfile`:
//!
//! - genres come from the LAST row that has a genre field, without merging
//!   rows ([`last_present_genres`]);
//! - the year is the EARLIEST known year across all rows ([`earliest_year`]).

use data_loader::{Book, CatalogIndex, Film, Year};
use serde::{Deserialize, Serialize};
use sources::AdaptedBook;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Genre set of the last row whose genre field is present.
///
/// Rows without a genre field are skipped; no rows with one gives an empty
/// set.
pub fn last_present_genres(rows: &[&Book]) -> BTreeSet<String> {
    rows.iter()
        .rev()
        .find_map(|book| book.genres())
        .unwrap_or_default()
}

/// Smallest known publication year across rows
pub fn earliest_year(rows: &[&Book]) -> Option<Year> {
    rows.iter().filter_map(|book| book.year).min()
}

/// What the scorer compares a film against
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookProfile {
    pub genres: BTreeSet<String>,
    pub year: Option<Year>,
}

impl BookProfile {
    pub fn from_rows(rows: &[&Book]) -> Self {
        Self {
            genres: last_present_genres(rows),
            year: earliest_year(rows),
        }
    }
}

/// Share of genres a film and a book have in common
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreSimilarity {
    /// |shared| / |union|, in [0, 1]
    pub ratio: f64,
    pub shared: BTreeSet<String>,
}

impl GenreSimilarity {
    /// Ratio as a rounded percentage
    pub fn percent(&self) -> u32 {
        (self.ratio * 100.0).round() as u32
    }
}

/// Jaccard overlap of the film and book genre sets.
///
/// An empty union scores 0.0 with no shared genres.
pub fn genre_similarity(film: &Film, book: &BookProfile) -> GenreSimilarity {
    let shared: BTreeSet<String> = film.genres.intersection(&book.genres).cloned().collect();
    let union = film.genres.union(&book.genres).count();
    if union == 0 {
        return GenreSimilarity {
            ratio: 0.0,
            shared: BTreeSet::new(),
        };
    }
    GenreSimilarity {
        ratio: shared.len() as f64 / union as f64,
        shared,
    }
}

/// Years between publication and release.
///
/// Negative when the book came out after the film. Unknown if either year
/// is unknown.
pub fn year_gap(film: &Film, book: &BookProfile) -> Option<i32> {
    Some(film.year? - book.year?)
}

/// Scores of one adapted book against the film
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookComparison {
    pub book: AdaptedBook,
    pub similarity: GenreSimilarity,
    pub year_gap: Option<i32>,
}

/// The comparison with the highest ratio.
///
/// Equal ratios go to the smallest (title, author) so the answer does not
/// depend on iteration order.
pub fn best_match(comparisons: &[BookComparison]) -> Option<&BookComparison> {
    comparisons.iter().max_by(|a, b| {
        a.similarity
            .ratio
            .partial_cmp(&b.similarity.ratio)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.book.cmp(&a.book))
    })
}

/// Largest known year gap; unknown gaps are ignored
pub fn max_known_gap(comparisons: &[BookComparison]) -> Option<i32> {
    comparisons.iter().filter_map(|c| c.year_gap).max()
}

/// Looks books up in the catalog and scores them against a film.
#[derive(Clone)]
pub struct SimilarityScorer {
    catalog: Arc<CatalogIndex>,
}

impl SimilarityScorer {
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        Self { catalog }
    }

    /// Profile of a book from every catalog row with its title and author
    pub fn profile(&self, book: &AdaptedBook) -> BookProfile {
        let rows = self
            .catalog
            .books_by_title_and_author(&book.title, &book.author);
        BookProfile::from_rows(&rows)
    }

    pub fn compare(&self, film: &Film, book: &AdaptedBook) -> BookComparison {
        let profile = self.profile(book);
        BookComparison {
            book: book.clone(),
            similarity: genre_similarity(film, &profile),
            year_gap: year_gap(film, &profile),
        }
    }

    /// One comparison per book, in the books' order
    pub fn compare_all<'a, I>(&self, film: &Film, books: I) -> Vec<BookComparison>
    where
        I: IntoIterator<Item = &'a AdaptedBook>,
    {
        books
            .into_iter()
            .map(|book| self.compare(film, book))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genres(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    fn film(tags: &[&str], year: Option<Year>) -> Film {
        Film {
            id: "tt0004873".to_string(),
            title: "Alice in Wonderland".to_string(),
            title_type: "movie".to_string(),
            year,
            genres: genres(tags),
        }
    }

    fn row(genre: Option<&str>, year: Option<Year>) -> Book {
        Book {
            title: "Alice in Wonderland".to_string(),
            author: Some("Carroll, Lewis".to_string()),
            genre: genre.map(String::from),
            year,
        }
    }

    fn comparison(title: &str, ratio: f64, gap: Option<i32>) -> BookComparison {
        BookComparison {
            book: AdaptedBook::new(title, "Lewis Carroll"),
            similarity: GenreSimilarity {
                ratio,
                shared: BTreeSet::new(),
            },
            year_gap: gap,
        }
    }

    // --- aggregation policies ---

    #[test]
    fn test_last_present_genres_takes_last_not_union() {
        let first = row(Some("Fantasy ; Children's fiction"), None);
        let second = row(Some("Illustration ; Fiction"), None);
        let third = row(None, None);

        let selected = last_present_genres(&[&first, &second, &third]);
        assert_eq!(selected, genres(&["Illustration", "Fiction"]));
    }

    #[test]
    fn test_last_present_genres_all_missing() {
        let only = row(None, Some(1907));
        assert!(last_present_genres(&[&only]).is_empty());
        assert!(last_present_genres(&[]).is_empty());
    }

    #[test]
    fn test_earliest_year_takes_minimum_known() {
        let a = row(None, Some(1907));
        let b = row(None, None);
        let c = row(None, Some(1893));

        assert_eq!(earliest_year(&[&a, &b, &c]), Some(1893));
        assert_eq!(earliest_year(&[&b]), None);
    }

    // --- genre similarity ---

    #[test]
    fn test_partial_overlap() {
        let f = film(&["Adventure", "Family", "Fantasy"], Some(1915));
        let book = BookProfile {
            genres: genres(&["Fantasy", "Children's fiction"]),
            year: Some(1907),
        };

        let similarity = genre_similarity(&f, &book);
        assert!((similarity.ratio - 0.25).abs() < 1e-9);
        assert_eq!(similarity.shared, genres(&["Fantasy"]));
        assert_eq!(similarity.percent(), 25);
    }

    #[test]
    fn test_identical_and_disjoint() {
        let f = film(&["Drama", "Romance"], None);

        let same = BookProfile {
            genres: genres(&["Romance", "Drama"]),
            year: None,
        };
        assert_eq!(genre_similarity(&f, &same).ratio, 1.0);

        let disjoint = BookProfile {
            genres: genres(&["Horror"]),
            year: None,
        };
        let similarity = genre_similarity(&f, &disjoint);
        assert_eq!(similarity.ratio, 0.0);
        assert!(similarity.shared.is_empty());
    }

    #[test]
    fn test_empty_union() {
        let f = film(&[], None);
        let similarity = genre_similarity(&f, &BookProfile::default());
        assert_eq!(similarity.ratio, 0.0);
        assert!(similarity.shared.is_empty());
    }

    // --- year gap ---

    #[test]
    fn test_year_gap_sign_and_unknowns() {
        let f = film(&["Drama"], Some(1915));

        let older = BookProfile {
            genres: BTreeSet::new(),
            year: Some(1893),
        };
        assert_eq!(year_gap(&f, &older), Some(22));

        let newer = BookProfile {
            genres: BTreeSet::new(),
            year: Some(1920),
        };
        assert_eq!(year_gap(&f, &newer), Some(-5));

        assert_eq!(year_gap(&f, &BookProfile::default()), None);
        assert_eq!(year_gap(&film(&["Drama"], None), &older), None);
    }

    // --- aggregation across books ---

    #[test]
    fn test_best_match_tie_breaks_by_title() {
        let comparisons = vec![
            comparison("Through the Looking Glass", 0.2, Some(22)),
            comparison("Alice in Wonderland", 0.2, Some(8)),
            comparison("Sylvie and Bruno", 0.1, None),
        ];

        let best = best_match(&comparisons).unwrap();
        assert_eq!(best.book.title, "Alice in Wonderland");
        assert!(best_match(&[]).is_none());
    }

    #[test]
    fn test_max_known_gap_ignores_unknowns() {
        let comparisons = vec![
            comparison("A", 0.0, None),
            comparison("B", 0.0, Some(-3)),
            comparison("C", 0.0, Some(8)),
        ];
        assert_eq!(max_known_gap(&comparisons), Some(8));

        let unknown = vec![comparison("A", 0.0, None)];
        assert_eq!(max_known_gap(&unknown), None);

        let negative = vec![comparison("A", 0.0, Some(-3)), comparison("B", 0.0, None)];
        assert_eq!(max_known_gap(&negative), Some(-3));
    }

    // --- scorer over the catalog ---

    #[test]
    fn test_scorer_uses_matching_rows_only() {
        let mut index = CatalogIndex::new();
        index.insert_book(row(Some("Fantasy"), Some(1907)));
        index.insert_book(Book {
            title: "ALICE IN WONDERLAND".to_string(),
            author: Some("Carroll, Lewis".to_string()),
            genre: None,
            year: Some(1899),
        });
        index.insert_book(Book {
            title: "Alice in Wonderland".to_string(),
            author: Some("Other, Author".to_string()),
            genre: Some("Horror".to_string()),
            year: Some(1700),
        });

        let scorer = SimilarityScorer::new(Arc::new(index));
        let book = AdaptedBook::new("Alice in Wonderland", "Lewis Carroll");

        let profile = scorer.profile(&book);
        assert_eq!(profile.genres, genres(&["Fantasy"]));
        assert_eq!(profile.year, Some(1899));

        let f = film(&["Adventure", "Family", "Fantasy"], Some(1915));
        let compared = scorer.compare(&f, &book);
        assert!((compared.similarity.ratio - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(compared.year_gap, Some(16));
    }

    #[test]
    fn test_scorer_unknown_book() {
        let scorer = SimilarityScorer::new(Arc::new(CatalogIndex::new()));
        let f = film(&["Drama"], Some(2000));

        let compared = scorer.compare(&f, &AdaptedBook::new("Nowhere", "Nobody"));
        assert_eq!(compared.similarity.ratio, 0.0);
        assert_eq!(compared.year_gap, None);
    }
}
