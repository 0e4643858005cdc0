//! Picking one film among movies that share a title.
//!
//! Resolution is a pure function of the candidates and the answers gathered
//! so far. It says which answer it needs next; the engine asks the input
//! provider and calls it again.

use crate::error::{RecommendError, Result};
use data_loader::{parse_year, Film};

/// Answers collected from the reader
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisambiguationAnswers {
    /// Release year as typed
    pub release_year: Option<String>,
    /// 1-based position among the films left after the year filter
    pub choice: Option<usize>,
}

#[derive(Debug, PartialEq)]
pub enum FilmResolution<'a> {
    Resolved(&'a Film),
    /// Several movies share the title
    NeedsReleaseYear(Vec<&'a Film>),
    /// Several movies share title and release year
    NeedsChoice(Vec<&'a Film>),
    NotFound,
}

/// Narrow `candidates` (exact-title movies, in catalog order) to one film.
///
/// 1. no candidates: not found; one candidate: resolved
/// 2. several: keep those released in the answered year (none left: not found)
/// 3. still several: take the chosen one
pub fn resolve_film<'a>(
    candidates: Vec<&'a Film>,
    answers: &DisambiguationAnswers,
) -> Result<FilmResolution<'a>> {
    match candidates.len() {
        0 => return Ok(FilmResolution::NotFound),
        1 => return Ok(FilmResolution::Resolved(candidates[0])),
        _ => {}
    }

    let Some(answer) = answers.release_year.as_deref() else {
        return Ok(FilmResolution::NeedsReleaseYear(candidates));
    };
    let year = parse_year(answer.trim());
    let remaining: Vec<&Film> = candidates
        .into_iter()
        .filter(|film| year.is_some() && film.year == year)
        .collect();

    match remaining.len() {
        0 => Ok(FilmResolution::NotFound),
        1 => Ok(FilmResolution::Resolved(remaining[0])),
        count => match answers.choice {
            None => Ok(FilmResolution::NeedsChoice(remaining)),
            Some(choice) if (1..=count).contains(&choice) => {
                Ok(FilmResolution::Resolved(remaining[choice - 1]))
            }
            Some(choice) => Err(RecommendError::InvalidChoice { choice, count }),
        },
    }
}
