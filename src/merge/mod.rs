//! Header detection, label-aligned merge and column projection
//!
//! The pipeline for one request is strictly linear: every input is read and
//! merged in the order supplied, then the merged table is projected onto the
//! requested columns. Any error aborts the whole request.

use crate::domain::Config;
use crate::error::{MergeError, MergeResult};
use crate::sheet::read_raw_table;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub mod header;
pub mod request;
pub mod table;

pub use header::{find_header_row, normalize_label, normalize_table, NormalizedTable};
pub use request::ColumnRequest;
pub use table::{MergedTable, OutputTable};

/// Per-file outcome of header detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub header_row: Option<usize>,
    pub columns: Vec<String>,
    pub rows: usize,
}

impl FileSummary {
    fn of(table: &NormalizedTable) -> Self {
        Self {
            path: table.source().to_path_buf(),
            header_row: table.header_row(),
            columns: table.labels().to_vec(),
            rows: table.rows().len(),
        }
    }
}

/// Every input merged into one table, plus what was learned per file.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub merged: MergedTable,
    pub files: Vec<FileSummary>,
}

/// Read one spreadsheet and normalize it under `config`.
pub fn load_normalized(path: &Path, config: &Config) -> MergeResult<NormalizedTable> {
    let raw = read_raw_table(path)?;
    let table = normalize_table(raw, &config.header_marker, config.header_policy)?;
    tracing::debug!("Adjusted columns for {}: {:?}", path.display(), table.labels());
    Ok(table)
}

/// Read, normalize and merge `inputs` in order.
pub fn merge_files(inputs: &[PathBuf], config: &Config) -> MergeResult<MergeOutcome> {
    if inputs.is_empty() {
        return Err(MergeError::NoInputs);
    }

    let mut merged = MergedTable::new();
    let mut files = Vec::with_capacity(inputs.len());
    for path in inputs {
        let table = load_normalized(path, config)?;
        merged.append(&table);
        files.push(FileSummary::of(&table));
    }

    tracing::info!(
        "Merged {} files into {} rows x {} columns",
        files.len(),
        merged.row_count(),
        merged.labels().len()
    );
    Ok(MergeOutcome { merged, files })
}

/// Project `merged` onto the columns named in `column_request_text`.
///
/// Fails with [`MergeError::NoMatchingColumns`] when none of the requested
/// names exist, listing the labels that do.
pub fn filter_columns(merged: &MergedTable, column_request_text: &str) -> MergeResult<OutputTable> {
    let request = ColumnRequest::parse(column_request_text);
    let matched = merged.matched_columns(&request);

    if matched.is_empty() {
        return Err(MergeError::NoMatchingColumns {
            requested: request.names().to_vec(),
            available: merged.labels(),
        });
    }

    let skipped: Vec<&String> = request.names().iter().filter(|n| !matched.contains(n)).collect();
    if !skipped.is_empty() {
        tracing::warn!("Requested columns not found and skipped: {:?}", skipped);
    }

    Ok(merged.project(&matched))
}

/// Merge every input and keep only the requested columns.
pub fn merge_and_filter(
    inputs: &[PathBuf],
    column_request_text: &str,
    config: &Config,
) -> MergeResult<OutputTable> {
    let outcome = merge_files(inputs, config)?;
    filter_columns(&outcome.merged, column_request_text)
}
