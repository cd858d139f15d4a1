//! Error taxonomy for the merge pipeline

use std::path::PathBuf;
use thiserror::Error;

pub type MergeResult<T> = Result<T, MergeError>;

/// Every failure aborts the whole merge; there is no per-file partial success.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("No input spreadsheets were supplied")]
    NoInputs,

    #[error("Failed to read spreadsheet {path}: {reason}")]
    UnreadableFile { path: PathBuf, reason: String },

    #[error("Spreadsheet {path} has no worksheet")]
    EmptyWorkbook { path: PathBuf },

    #[error("No row in {path} contains the header marker '{marker}'")]
    HeaderNotFound { path: PathBuf, marker: String },

    #[error("Column '{label}' appears more than once in {path} after normalization")]
    DuplicateColumn { path: PathBuf, label: String },

    #[error("No valid column was found. Available columns: {}", .available.join(", "))]
    NoMatchingColumns { requested: Vec<String>, available: Vec<String> },

    #[error("Failed to write spreadsheet {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

impl MergeError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        MergeError::UnreadableFile { path: path.into(), reason: reason.to_string() }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        MergeError::Write { path: path.into(), reason: reason.to_string() }
    }
}
