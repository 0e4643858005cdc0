//! Errors surfaced by the recommendation engine.

use data_loader::{DataLoadError, Year};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    /// No movie has exactly this title (or none matches the release year)
    #[error("There is no movie titled '{title}'")]
    FilmNotFound { title: String },

    /// A film id that is not in the catalog
    #[error("Film {id} is not in the catalog")]
    UnknownFilm { id: String },

    /// Disambiguation choice outside the listed films
    #[error("Choice {choice} is out of range (1-{count})")]
    InvalidChoice { choice: usize, count: usize },

    #[error("Start year {start} is after end year {end}")]
    InvalidYearRange { start: Year, end: Year },

    /// Catalog integrity fault, e.g. a writer without a person record
    #[error(transparent)]
    Catalog(#[from] DataLoadError),

    /// Failure in a collaborator (input provider, filter)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
