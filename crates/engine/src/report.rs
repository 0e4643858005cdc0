//! Results of the two recommendation modes.

use crate::display::display_titles;
use data_loader::{Film, Year};
use pipeline::BookComparison;
use serde::Serialize;
use sources::AdaptedBook;
use std::collections::BTreeSet;

/// Titles in display form, or an explicit "nothing matched"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "titles", rename_all = "snake_case")]
pub enum Shortlist {
    Books(BTreeSet<String>),
    Empty,
}

impl Shortlist {
    /// Title-case stored titles; no titles gives `Empty`
    pub fn from_stored_titles<I>(titles: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let titles = display_titles(titles);
        if titles.is_empty() {
            Shortlist::Empty
        } else {
            Shortlist::Books(titles)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Shortlist::Empty)
    }

    pub fn len(&self) -> usize {
        match self {
            Shortlist::Books(titles) => titles.len(),
            Shortlist::Empty => 0,
        }
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        let titles = match self {
            Shortlist::Books(titles) => Some(titles),
            Shortlist::Empty => None,
        };
        titles.into_iter().flatten().map(String::as_str)
    }
}

/// Mode A outcome for a film that adapts books
#[derive(Debug, Clone, Serialize)]
pub struct AdaptationReport {
    pub film: Film,
    pub books: BTreeSet<AdaptedBook>,
    /// One per adapted book, in `books` order
    pub comparisons: Vec<BookComparison>,
    /// Highest similarity ratio (ties: smallest title, then author)
    pub best: BookComparison,
    /// Largest known gap between publication and release
    pub max_year_gap: Option<i32>,
}

/// Mode A outcome for a film that adapts nothing
#[derive(Debug, Clone, Serialize)]
pub struct SimilarBooks {
    pub film: Film,
    pub year_offset: Year,
    /// Publication window searched; unknown when the film year is unknown
    pub window: Option<(Year, Year)>,
    pub shortlist: Shortlist,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilmRecommendation {
    Adaptation(AdaptationReport),
    Similar(SimilarBooks),
}

impl FilmRecommendation {
    pub fn film(&self) -> &Film {
        match self {
            FilmRecommendation::Adaptation(report) => &report.film,
            FilmRecommendation::Similar(similar) => &similar.film,
        }
    }
}

/// Mode B outcome
#[derive(Debug, Clone, Serialize)]
pub struct GenrePeriodRecommendation {
    /// Requested genres that are book genres
    pub genres: Vec<String>,
    /// Requested genres no book is tagged with
    pub unknown_genres: Vec<String>,
    pub start: Year,
    pub end: Year,
    pub shortlist: Shortlist,
}
