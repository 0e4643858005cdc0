//! # Recommendation Engine
//!
//! Coordinates the two recommendation modes:
//!
//! **Film mode**
//! 1. Identify the film by exact title, asking for a release year and then a
//!    choice when several movies share the title
//! 2. Resolve the books it adapts
//! 3. Adaptation: score every adapted book, report the best genre match and
//!    the largest known publication-to-release gap
//! 4. No adaptation: shortlist books sharing a genre with the film and
//!    published within a window around (release year - offset)
//!
//! **Genre and period mode**
//! Shortlist books tagged with the requested genres and published within the
//! requested years.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use data_loader::{CatalogIndex, Film, Year};
use pipeline::filters::{GenreMembershipFilter, YearRangeFilter};
use pipeline::{best_match, max_known_gap, FilterPipeline, SimilarityScorer};
use sources::AdaptationSource;

use crate::disambiguation::{resolve_film, DisambiguationAnswers, FilmResolution};
use crate::error::{RecommendError, Result};
use crate::input::InputProvider;
use crate::report::{
    AdaptationReport, FilmRecommendation, GenrePeriodRecommendation, Shortlist, SimilarBooks,
};

/// Default half-width of the publication window for similar books
pub const DEFAULT_YEAR_TOLERANCE: u32 = 10;

/// Main engine composing the resolver, the scorer and the corpus filter
#[derive(Clone)]
pub struct RecommendationEngine {
    catalog: Arc<CatalogIndex>,
    adaptations: AdaptationSource,
    scorer: SimilarityScorer,
    year_tolerance: u32,
}

impl RecommendationEngine {
    /// Create an engine over a loaded catalog
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        Self {
            adaptations: AdaptationSource::new(catalog.clone()),
            scorer: SimilarityScorer::new(catalog.clone()),
            catalog,
            year_tolerance: DEFAULT_YEAR_TOLERANCE,
        }
    }

    /// Configure the similar-books window half-width (default: 10 years)
    pub fn with_year_tolerance(mut self, tolerance: u32) -> Self {
        self.year_tolerance = tolerance;
        self
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    /// Resolve a title to exactly one movie, asking `input` for whatever
    /// disambiguation the catalog requires
    #[instrument(skip(self, input))]
    pub fn identify_film(&self, title: &str, input: &mut dyn InputProvider) -> Result<&Film> {
        let mut answers = DisambiguationAnswers::default();
        loop {
            let candidates = self.catalog.movies_by_title(title);
            match resolve_film(candidates, &answers)? {
                FilmResolution::Resolved(film) => {
                    debug!("Identified '{}' as {}", title, film.id);
                    return Ok(film);
                }
                FilmResolution::NeedsReleaseYear(films) => {
                    answers.release_year = Some(input.release_year(title, &films)?);
                }
                FilmResolution::NeedsChoice(films) => {
                    answers.choice = Some(input.choose_film(&films)?);
                }
                FilmResolution::NotFound => {
                    return Err(RecommendError::FilmNotFound {
                        title: title.to_string(),
                    });
                }
            }
        }
    }

    /// Film mode, starting from a title
    pub fn recommend_for_film(
        &self,
        title: &str,
        input: &mut dyn InputProvider,
    ) -> Result<FilmRecommendation> {
        let film = self.identify_film(title, input)?;
        self.recommend_for_film_id(&film.id, input)
    }

    /// Film mode for an already identified film
    #[instrument(skip(self, input))]
    pub fn recommend_for_film_id(
        &self,
        film_id: &str,
        input: &mut dyn InputProvider,
    ) -> Result<FilmRecommendation> {
        let film = self
            .catalog
            .get_film(film_id)
            .ok_or_else(|| RecommendError::UnknownFilm {
                id: film_id.to_string(),
            })?;

        let books = self.adaptations.resolve_adaptations(film_id)?;
        let comparisons = self.scorer.compare_all(film, &books);

        match best_match(&comparisons).cloned() {
            Some(best) => {
                info!(
                    "'{}' adapts {} books, best match {} at {}%",
                    film.title,
                    books.len(),
                    best.book,
                    best.similarity.percent()
                );
                let max_year_gap = max_known_gap(&comparisons);
                Ok(FilmRecommendation::Adaptation(AdaptationReport {
                    film: film.clone(),
                    books,
                    comparisons,
                    best,
                    max_year_gap,
                }))
            }
            None => {
                info!("'{}' is not an adaptation, looking for similar books", film.title);
                let offset = input.year_offset(film)?;
                Ok(FilmRecommendation::Similar(self.similar_books(film, offset)?))
            }
        }
    }

    /// Books sharing a genre (substring match) with the film and published
    /// within the tolerance around `release year - offset`.
    ///
    /// Window bounds saturate at the representable years.
    pub fn similar_books(&self, film: &Film, offset: Year) -> Result<SimilarBooks> {
        let Some(release) = film.year else {
            debug!("{} has no release year, no window to search", film.id);
            return Ok(SimilarBooks {
                film: film.clone(),
                year_offset: offset,
                window: None,
                shortlist: Shortlist::Empty,
            });
        };

        let center = release.saturating_sub(offset);
        let window = YearRangeFilter::around(center, self.year_tolerance);
        let bounds = window.bounds();
        let titles = FilterPipeline::new()
            .add_filter(GenreMembershipFilter::new(film.genres.iter().cloned()))
            .add_filter(window)
            .apply(&self.catalog)?;

        Ok(SimilarBooks {
            film: film.clone(),
            year_offset: offset,
            window: Some(bounds),
            shortlist: Shortlist::from_stored_titles(titles),
        })
    }

    /// Genre and period mode.
    ///
    /// Requested genres are trimmed and kept only if some book is tagged with
    /// exactly that genre; the rest are reported back as unknown.
    #[instrument(skip(self, genres))]
    pub fn recommend_by_genre_and_period<S: AsRef<str>>(
        &self,
        genres: &[S],
        start: Year,
        end: Year,
    ) -> Result<GenrePeriodRecommendation> {
        if start > end {
            return Err(RecommendError::InvalidYearRange { start, end });
        }

        let vocabulary = self.catalog.book_genre_vocabulary();
        let (known, unknown): (Vec<String>, Vec<String>) = genres
            .iter()
            .map(|genre| genre.as_ref().trim())
            .filter(|genre| !genre.is_empty())
            .map(str::to_string)
            .partition(|genre| vocabulary.contains(genre));

        let shortlist = if known.is_empty() {
            debug!("None of the requested genres is a book genre");
            Shortlist::Empty
        } else {
            let titles = FilterPipeline::new()
                .add_filter(GenreMembershipFilter::new(known.iter().cloned()))
                .add_filter(YearRangeFilter::new(start, end))
                .apply(&self.catalog)?;
            Shortlist::from_stored_titles(titles)
        };

        info!(
            "Genre and period search found {} books ({} unknown genres)",
            shortlist.len(),
            unknown.len()
        );
        Ok(GenrePeriodRecommendation {
            genres: known,
            unknown_genres: unknown,
            start,
            end,
            shortlist,
        })
    }
}
