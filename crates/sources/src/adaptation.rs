//! Adaptation Source - literary sources of a film
//!
//! Finds the books a film is based on through its writer credits:
//!
//! ## Algorithm
//! 1. Look up the film's writer ids in the crew table
//!    (none, or the "original work" marker, means no adaptation)
//! 2. Resolve each writer's display name
//! 3. Scan every credit of that writer for quoted titles in the job text
//! 4. Collect (title, writer name) pairs into a set

use crate::quoted::quoted_titles;
use crate::types::AdaptedBook;
use data_loader::{CatalogIndex, DataLoadError, Result, WriterCredits};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Resolves films to the books they adapt
#[derive(Clone)]
pub struct AdaptationSource {
    /// Shared reference to the catalog (read-only, so no Mutex needed)
    catalog: Arc<CatalogIndex>,
}

impl AdaptationSource {
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        Self { catalog }
    }

    /// All books the film is an adaptation of.
    ///
    /// An empty set is the normal answer for original works and for films
    /// without a crew row. A writer id without a person record is a
    /// data-integrity fault and is returned as `MissingReference`.
    #[instrument(skip(self))]
    pub fn resolve_adaptations(&self, film_id: &str) -> Result<BTreeSet<AdaptedBook>> {
        let writers = match self.catalog.get_credit_link(film_id) {
            Some(link) => match &link.writers {
                WriterCredits::Writers(ids) => ids,
                WriterCredits::Original => {
                    debug!("Film {} is an original work", film_id);
                    return Ok(BTreeSet::new());
                }
            },
            None => {
                debug!("Film {} has no crew record", film_id);
                return Ok(BTreeSet::new());
            }
        };

        let mut books = BTreeSet::new();
        for writer_id in writers {
            let writer_name = self.writer_name(writer_id)?;
            for title in self.quoted_titles_of(writer_id) {
                books.insert(AdaptedBook::new(title, writer_name));
            }
        }

        debug!(
            "Resolved {} adapted books from {} writers",
            books.len(),
            writers.len()
        );
        Ok(books)
    }

    fn writer_name(&self, writer_id: &str) -> Result<&str> {
        self.catalog
            .get_person(writer_id)
            .map(|person| person.name.as_str())
            .ok_or_else(|| DataLoadError::MissingReference {
                entity: "Person".to_string(),
                id: writer_id.to_string(),
            })
    }

    /// Quoted titles across every credit of one person
    fn quoted_titles_of<'a>(&'a self, person_id: &str) -> impl Iterator<Item = &'a str> {
        self.catalog
            .get_person_credits(person_id)
            .iter()
            .filter(|credit| credit.has_quote())
            .flat_map(|credit| quoted_titles(&credit.job))
    }
}
