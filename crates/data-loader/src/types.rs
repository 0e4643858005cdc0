//! Core domain types for the film and book catalogs.
//!
//! This module defines the records loaded from the IMDb title/name dumps and
//! the book export, plus the `CatalogIndex` that holds them for the session.
//! Everything here is loaded once and read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

// =============================================================================
// Type Aliases and Constants
// =============================================================================

/// IMDb title identifier (`tconst`, e.g. "tt0004873")
pub type FilmId = String;

/// IMDb person identifier (`nconst`, e.g. "nm0140902")
pub type PersonId = String;

/// Calendar year. Signed so that year gaps can be negative.
pub type Year = i32;

/// Reserved token the source dumps use for a missing value
pub const MISSING_MARKER: &str = "\\N";

/// Separator inside a film's genre field ("Adventure,Family,Fantasy")
pub const FILM_GENRE_DELIMITER: char = ',';

/// Separator inside a book's genre field ("Fantasy ; Children's fiction")
pub const BOOK_GENRE_DELIMITER: &str = " ; ";

/// Title type of feature films in `title.basics`
pub const MOVIE_TITLE_TYPE: &str = "movie";

/// Parse a year field.
///
/// Only non-empty, pure ASCII digit strings are years. Everything else
/// (the missing marker, "c. 1865", "1865?", "") is `None`, never 0.
pub fn parse_year(field: &str) -> Option<Year> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

// =============================================================================
// Film-side Types
// =============================================================================

/// A row of `title.basics`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: FilmId,
    pub title: String,
    /// Raw `titleType` ("movie", "short", "tvSeries", ...)
    pub title_type: String,
    pub year: Option<Year>,
    /// Never empty for a loaded film
    pub genres: BTreeSet<String>,
}

impl Film {
    pub fn is_movie(&self) -> bool {
        self.title_type == MOVIE_TITLE_TYPE
    }
}

/// Writer credits of a film, from `title.crew`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriterCredits {
    /// The crew row lists no writer: the film is an original work
    Original,
    /// Non-empty, in credit order
    Writers(Vec<PersonId>),
}

/// Links a film to the people credited as its writers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditLink {
    pub film_id: FilmId,
    pub writers: WriterCredits,
}

/// A row of `name.basics`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
}

/// A row of `title.principals` with a present job description
///
/// The job text is free-form, e.g. `based on the novel "Emma"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub person_id: PersonId,
    pub job: String,
}

impl Credit {
    /// Whether the job text mentions anything in double quotes
    pub fn has_quote(&self) -> bool {
        self.job.contains('"')
    }
}

// =============================================================================
// Book-side Types
// =============================================================================

/// A row of the book export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    /// Stored as "Last, First" (or just one name)
    pub author: Option<String>,
    /// Raw genre field, tags joined by `BOOK_GENRE_DELIMITER`
    pub genre: Option<String>,
    pub year: Option<Year>,
}

impl Book {
    /// Author in "First Last" order, as film credits spell it.
    ///
    /// "Carroll, Lewis" becomes "Lewis Carroll". Only the first two
    /// comma-separated parts are used; a single-part name is kept as is.
    pub fn author_display_name(&self) -> Option<String> {
        let author = self.author.as_deref()?;
        let mut parts = author.split(", ");
        match (parts.next(), parts.next()) {
            (Some(last), Some(first)) => Some(format!("{} {}", first, last)),
            _ => Some(author.to_string()),
        }
    }

    /// Tokenized genre tags, `None` when the field is missing
    pub fn genres(&self) -> Option<BTreeSet<String>> {
        self.genre
            .as_deref()
            .map(|raw| raw.split(BOOK_GENRE_DELIMITER).map(str::to_string).collect())
    }

    /// Substring match against the raw genre field.
    ///
    /// "Fiction" matches "Science Fiction". A missing field matches nothing.
    pub fn genre_contains(&self, token: &str) -> bool {
        self.genre
            .as_deref()
            .is_some_and(|raw| raw.contains(token))
    }

    /// Case-insensitive title and normalized author comparison
    pub fn matches(&self, title: &str, author_name: &str) -> bool {
        self.title.to_uppercase() == title.to_uppercase()
            && self.author_display_name().as_deref() == Some(author_name)
    }
}

// =============================================================================
// CatalogIndex - The In-Memory Catalog
// =============================================================================

/// Holds every table and the indices used by the resolver and the filters.
#[derive(Debug)]
pub struct CatalogIndex {
    // Primary data stores
    pub(crate) films: HashMap<FilmId, Film>,
    pub(crate) credit_links: HashMap<FilmId, CreditLink>,
    pub(crate) persons: HashMap<PersonId, Person>,
    /// All credits of each person, in file order
    pub(crate) person_credits: HashMap<PersonId, Vec<Credit>>,
    /// Books in file order
    pub(crate) books: Vec<Book>,

    // Secondary indices
    /// Film ids by exact primary title, in insertion order
    pub(crate) title_index: HashMap<String, Vec<FilmId>>,
    /// Book positions by uppercased title
    pub(crate) book_title_index: HashMap<String, Vec<usize>>,
}

impl CatalogIndex {
    /// Creates a new, empty CatalogIndex
    pub fn new() -> Self {
        Self {
            films: HashMap::new(),
            credit_links: HashMap::new(),
            persons: HashMap::new(),
            person_credits: HashMap::new(),
            books: Vec::new(),
            title_index: HashMap::new(),
            book_title_index: HashMap::new(),
        }
    }

    /// Get a film by id
    pub fn get_film(&self, id: &str) -> Option<&Film> {
        self.films.get(id)
    }

    /// All movies (title type "movie") whose primary title equals `title`
    /// exactly, in catalog order
    pub fn movies_by_title(&self, title: &str) -> Vec<&Film> {
        self.title_index
            .get(title)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.films.get(id))
                    .filter(|film| film.is_movie())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Writer credits of a film
    pub fn get_credit_link(&self, film_id: &str) -> Option<&CreditLink> {
        self.credit_links.get(film_id)
    }

    /// Get a person by id
    pub fn get_person(&self, id: &str) -> Option<&Person> {
        self.persons.get(id)
    }

    /// All credits of a person. Empty slice if there are none.
    pub fn get_person_credits(&self, person_id: &str) -> &[Credit] {
        self.person_credits
            .get(person_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Every book row, in file order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// All rows for one book, matched by case-insensitive title and
    /// "First Last" author name, in file order
    pub fn books_by_title_and_author(&self, title: &str, author_name: &str) -> Vec<&Book> {
        self.book_title_index
            .get(&title.to_uppercase())
            .map(|positions| {
                positions
                    .iter()
                    .map(|&pos| &self.books[pos])
                    .filter(|book| book.matches(title, author_name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every distinct genre tag used by at least one book
    pub fn book_genre_vocabulary(&self) -> BTreeSet<String> {
        self.books
            .iter()
            .filter_map(Book::genres)
            .flatten()
            .collect()
    }

    // Mutators - used during loading and by tests

    /// Insert a film and index its title
    pub fn insert_film(&mut self, film: Film) {
        if !self.films.contains_key(&film.id) {
            self.title_index
                .entry(film.title.clone())
                .or_default()
                .push(film.id.clone());
        }
        self.films.insert(film.id.clone(), film);
    }

    /// Insert writer credits. A later link for the same film replaces the
    /// earlier one.
    pub fn insert_credit_link(&mut self, link: CreditLink) {
        self.credit_links.insert(link.film_id.clone(), link);
    }

    /// Insert a person
    pub fn insert_person(&mut self, person: Person) {
        self.persons.insert(person.id.clone(), person);
    }

    /// Insert a principal credit
    pub fn insert_credit(&mut self, credit: Credit) {
        self.person_credits
            .entry(credit.person_id.clone())
            .or_default()
            .push(credit);
    }

    /// Insert a book row and index its title
    pub fn insert_book(&mut self, book: Book) {
        self.book_title_index
            .entry(book.title.to_uppercase())
            .or_default()
            .push(self.books.len());
        self.books.push(book);
    }

    /// Writer ids referenced by credit links that have no person record
    pub fn dangling_writers(&self) -> BTreeSet<&str> {
        self.credit_links
            .values()
            .filter_map(|link| match &link.writers {
                WriterCredits::Writers(ids) => Some(ids),
                WriterCredits::Original => None,
            })
            .flatten()
            .filter(|id| !self.persons.contains_key(id.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Get counts for debugging/validation: (films, persons, credits, books)
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        let total_credits = self.person_credits.values().map(|v| v.len()).sum();
        (
            self.films.len(),
            self.persons.len(),
            total_credits,
            self.books.len(),
        )
    }
}

impl Default for CatalogIndex {
    fn default() -> Self {
        Self::new()
    }
}
