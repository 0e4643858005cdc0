//! Types produced by the adaptation resolver.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A literary work a film is based on, as named in a writer's credits.
///
/// The title is exactly the quoted text of the job description. It is not
/// checked against the book table until the scorer looks it up.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AdaptedBook {
    pub title: String,
    /// Writer's display name ("First Last")
    pub author: String,
}

impl AdaptedBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }
}

impl fmt::Display for AdaptedBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" by {}", self.title, self.author)
    }
}
