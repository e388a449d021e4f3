//! Bulk source acquisition.
//!
//! The whole file is read and decoded before any row is normalized, so a
//! source that fails part-way yields nothing at all.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::LoadError;
use crate::parser::{BulkLoad, NormalizeOptions, parse_roster};

/// Reads `path` as UTF-8 text and normalizes its rows into a roster.
///
/// # Errors
///
/// Returns a [`LoadError`] when the file is missing, unreadable, not UTF-8,
/// or not tokenizable as CSV.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_roster(path: &Path, options: NormalizeOptions) -> Result<BulkLoad, LoadError> {
    let result = read_source(path).and_then(|text| {
        parse_roster(&text, options).map_err(|source| LoadError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    });

    match &result {
        Ok(load) => info!(
            students = load.roster.len(),
            skipped = load.rejected.len(),
            "Roster loaded"
        ),
        Err(e) => warn!(error = %e, "Roster load failed"),
    }
    result
}

fn read_source(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| LoadError::Encoding(path.to_path_buf()))
}
