//! Whole-file document load and save.

use std::fs;
use std::path::Path;

use super::error::{AppError, Result};

/// Read a document in one go.
pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a document in one go. No partial-write recovery is attempted.
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })
}
