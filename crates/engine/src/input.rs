//! Answers the engine needs from the reader, behind a trait.
//!
//! The command-line front end implements `InputProvider` with stdin
//! prompts; tests and scripted runs use `ScriptedInput`.

use anyhow::{anyhow, Result};
use data_loader::{Film, Year};

/// Source of the answers requested while resolving a film.
///
/// Each method is called only when the engine actually needs that answer.
pub trait InputProvider {
    /// Release year, asked when several movies share the title
    fn release_year(&mut self, title: &str, candidates: &[&Film]) -> Result<String>;

    /// 1-based position in `candidates`, asked when title and year still
    /// match several movies
    fn choose_film(&mut self, candidates: &[&Film]) -> Result<usize>;

    /// Years between book publication and film release, asked when the film
    /// is not an adaptation
    fn year_offset(&mut self, film: &Film) -> Result<Year>;
}

/// Which question an `InputProvider` was asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    ReleaseYear,
    ChooseFilm,
    YearOffset,
}

/// Preset answers. Asking for an answer that was not preset is an error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pub release_year: Option<String>,
    pub choice: Option<usize>,
    pub year_offset: Option<Year>,
    /// Questions asked so far, in order
    pub asked: Vec<Question>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_release_year(mut self, year: impl Into<String>) -> Self {
        self.release_year = Some(year.into());
        self
    }

    pub fn with_choice(mut self, choice: usize) -> Self {
        self.choice = Some(choice);
        self
    }

    pub fn with_year_offset(mut self, offset: Year) -> Self {
        self.year_offset = Some(offset);
        self
    }
}

impl InputProvider for ScriptedInput {
    fn release_year(&mut self, title: &str, _candidates: &[&Film]) -> Result<String> {
        self.asked.push(Question::ReleaseYear);
        self.release_year
            .clone()
            .ok_or_else(|| {
                anyhow!("Several movies are titled '{}'; a release year is needed", title)
            })
    }

    fn choose_film(&mut self, candidates: &[&Film]) -> Result<usize> {
        self.asked.push(Question::ChooseFilm);
        self.choice.ok_or_else(|| {
            anyhow!("{} movies share title and year; a choice is needed", candidates.len())
        })
    }

    fn year_offset(&mut self, film: &Film) -> Result<Year> {
        self.asked.push(Question::YearOffset);
        self.year_offset
            .ok_or_else(|| {
                anyhow!("'{}' is not an adaptation; a year offset is needed", film.title)
            })
    }
}
