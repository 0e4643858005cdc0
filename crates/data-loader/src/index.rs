//! CatalogIndex loading.
//!
//! Parses the five input files in parallel, inserts every record into a
//! fresh `CatalogIndex`, then reports referential-integrity problems.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{info, warn};

/// File names expected inside the data directory
pub const FILMS_FILE: &str = "title.basics.tsv";
pub const CREW_FILE: &str = "title.crew.tsv";
pub const PRINCIPALS_FILE: &str = "title.principals.tsv";
pub const NAMES_FILE: &str = "name.basics.tsv";
pub const BOOKS_FILE: &str = "titles.csv";

impl CatalogIndex {
    /// Load the whole catalog from a directory
    ///
    /// Steps:
    /// 1. Parse all five files (in parallel with Rayon)
    /// 2. Insert records, building the title indices as we go
    /// 3. Report writer ids that have no person record
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading catalog from {:?}", data_dir);

        let films_path = data_dir.join(FILMS_FILE);
        let crew_path = data_dir.join(CREW_FILE);
        let principals_path = data_dir.join(PRINCIPALS_FILE);
        let names_path = data_dir.join(NAMES_FILE);
        let books_path = data_dir.join(BOOKS_FILE);

        // Nested joins: principals is by far the largest file, so it gets
        // its own branch while the rest share the other one.
        let (((films, links), (persons, books)), credits) = rayon::join(
            || {
                rayon::join(
                    || {
                        rayon::join(
                            || parser::parse_films(&films_path),
                            || parser::parse_credit_links(&crew_path),
                        )
                    },
                    || {
                        rayon::join(
                            || parser::parse_persons(&names_path),
                            || parser::parse_books(&books_path),
                        )
                    },
                )
            },
            || parser::parse_credits(&principals_path),
        );

        let films = films?;
        let links = links?;
        let persons = persons?;
        let books = books?;
        let credits = credits?;

        info!(
            "Parsed {} films, {} crew rows, {} persons, {} credits, {} books",
            films.len(),
            links.len(),
            persons.len(),
            credits.len(),
            books.len()
        );

        let mut index = CatalogIndex::new();
        for film in films {
            index.insert_film(film);
        }
        for link in links {
            index.insert_credit_link(link);
        }
        for person in persons {
            index.insert_person(person);
        }
        for credit in credits {
            index.insert_credit(credit);
        }
        for book in books {
            index.insert_book(book);
        }

        let dangling = index.dangling_writers();
        if !dangling.is_empty() {
            warn!(
                "{} writer ids have no person record (e.g. {})",
                dangling.len(),
                dangling.iter().next().copied().unwrap_or_default()
            );
        }

        info!("Catalog loaded");
        Ok(index)
    }
}
