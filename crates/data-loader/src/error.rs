//! Error types for the data-loader crate.
//!
//! Loading errors carry enough context (file, line, column) to point at the
//! offending row. Lookup faults that indicate broken referential integrity
//! between tables (a writer id without a person record) share the same enum
//! so callers only deal with one catalog error type.

use thiserror::Error;

/// Errors that can occur while loading or querying the catalog
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The header row does not name a column the loader needs
    #[error("Missing column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// A row has fewer fields than the header promised
    #[error("Expected at least {expected} fields but found {found} in line {line} of {file}")]
    FieldCountMismatch {
        file: String,
        expected: usize,
        found: usize,
        line: usize,
    },

    /// Referenced entity doesn't exist (e.g., writer id with no person record)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
