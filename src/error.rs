//! Error types for the ingestion and export boundaries.
//!
//! Row-level problems in bulk text are not errors: they are collected as
//! [`RejectedRow`](crate::parser::RejectedRow) diagnostics and the load
//! carries on.

use std::path::PathBuf;

/// Input rejected during manual entry. The caller re-prompts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("`{0}` is not a whole number")]
    NotAWholeNumber(String),
    #[error("student count must be positive, got {0}")]
    NotPositive(i64),
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("marks {0} are outside 0-100")]
    OutOfRange(f64),
}

/// The bulk source could not be read. Nothing from it is kept.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not valid UTF-8 text", .0.display())]
    Encoding(PathBuf),
    #[error("malformed CSV in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// The export destination could not be written.
#[derive(Debug, thiserror::Error)]
#[error("could not write CSV {}: {source}", path.display())]
pub struct ExportError {
    pub path: PathBuf,
    #[source]
    pub source: csv::Error,
}
