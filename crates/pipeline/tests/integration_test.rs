//! Integration tests for the pipeline.
//!
//! These tests verify that the adaptation resolver, the scorer and the
//! corpus filter work together over one catalog.

use data_loader::{parse_year, Book, CatalogIndex, Credit, CreditLink, Film, Person, WriterCredits};
use pipeline::filters::*;
use pipeline::{best_match, max_known_gap, FilterPipeline, SimilarityScorer};
use sources::AdaptationSource;
use std::collections::BTreeSet;
use std::sync::Arc;

fn book(title: &str, author: &str, genre: Option<&str>, year: &str) -> Book {
    Book {
        title: title.to_string(),
        author: Some(author.to_string()),
        genre: genre.map(String::from),
        year: parse_year(year),
    }
}

fn create_test_setup() -> Arc<CatalogIndex> {
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
    index.insert_credit_link(CreditLink {
        film_id: "tt0004873".to_string(),
        writers: WriterCredits::Writers(vec!["nm0140902".to_string()]),
    });
    index.insert_person(Person {
        id: "nm0140902".to_string(),
        name: "Lewis Carroll".to_string(),
    });
    index.insert_credit(Credit {
        person_id: "nm0140902".to_string(),
        job: "novels \"Alice in Wonderland\" and \"Through the Looking-glass\"".to_string(),
    });

    // Several editions of each book
    index.insert_book(book("Alice in Wonderland", "Carroll, Lewis", Some("Fantasy"), "1907"));
    index.insert_book(book("Alice in Wonderland", "Carroll, Lewis", None, "1910"));
    index.insert_book(book(
        "Through the looking-glass",
        "Carroll, Lewis",
        Some("Fantasy ; Children's fiction"),
        "1872",
    ));
    index.insert_book(book(
        "Through the looking-glass",
        "Carroll, Lewis",
        Some("Illustration ; Fiction"),
        "1893",
    ));
    // Unrelated corpus
    index.insert_book(book("The Hobbit", "Tolkien, J. R. R.", Some("Fantasy"), "1937"));
    index.insert_book(book("Emma", "Austen, Jane", Some("Romance"), "1870"));

    Arc::new(index)
}

#[test]
fn test_adaptation_then_scoring() {
    let catalog = create_test_setup();
    let source = AdaptationSource::new(catalog.clone());
    let scorer = SimilarityScorer::new(catalog.clone());

    let film = catalog.get_film("tt0004873").unwrap();
    let books = source.resolve_adaptations(&film.id).unwrap();
    assert_eq!(books.len(), 2);

    let comparisons = scorer.compare_all(film, &books);
    assert_eq!(comparisons.len(), 2);
    for comparison in &comparisons {
        assert!(
            (0.0..=1.0).contains(&comparison.similarity.ratio),
            "Genre similarity should be in [0, 1]"
        );
    }

    // "Alice in Wonderland": {Fantasy} vs {Adventure, Family, Fantasy} = 1/3
    // "Through the Looking-glass": last present genres {Illustration, Fiction} = 0
    let best = best_match(&comparisons).unwrap();
    assert_eq!(best.book.title, "Alice in Wonderland");
    assert_eq!(best.similarity.shared, BTreeSet::from(["Fantasy".to_string()]));

    // Earliest editions: 1907 and 1872
    assert_eq!(max_known_gap(&comparisons), Some(43));
}

#[test]
fn test_genre_and_period_selection() {
    let catalog = create_test_setup();

    let pipeline = FilterPipeline::new()
        .add_filter(GenreMembershipFilter::new(["Fantasy"]))
        .add_filter(YearRangeFilter::new(1800, 1900));

    let titles = pipeline.apply(&catalog).unwrap();
    assert_eq!(
        titles.into_iter().collect::<Vec<_>>(),
        vec!["Through the looking-glass".to_string()]
    );
}

#[test]
fn test_queries_are_idempotent() {
    let catalog = create_test_setup();

    assert_eq!(
        books_in_year_range(&catalog, 1800, 1950),
        books_in_year_range(&catalog, 1800, 1950)
    );
    assert_eq!(
        books_by_genre_membership(&catalog, &["Fiction"]),
        books_by_genre_membership(&catalog, &["Fiction"])
    );
}
