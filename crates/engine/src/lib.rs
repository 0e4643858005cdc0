//! Engine crate for the reel-reads book recommender.
//!
//! This crate contains the engine that coordinates the adaptation resolver,
//! the similarity scorer and the corpus filter, plus the film
//! disambiguation it needs from the reader.

pub mod error;
pub mod input;
pub mod disambiguation;
pub mod display;
pub mod report;
pub mod orchestrator;

pub use error::{RecommendError, Result};
pub use input::{InputProvider, Question, ScriptedInput};
pub use disambiguation::{resolve_film, DisambiguationAnswers, FilmResolution};
pub use display::{display_title, display_titles};
pub use report::{
    AdaptationReport, FilmRecommendation, GenrePeriodRecommendation, Shortlist, SimilarBooks,
};
pub use orchestrator::{RecommendationEngine, DEFAULT_YEAR_TOLERANCE};
