//! Header row detection and column label normalization

use crate::domain::{Cell, HeaderPolicy, RawTable};
use crate::error::{MergeError, MergeResult};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One input file after its header row has been located.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    source: PathBuf,
    header_row: Option<usize>,
    labels: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl NormalizedTable {
    /// Build a table, rejecting labels that collide.
    pub fn new(
        source: impl Into<PathBuf>,
        header_row: Option<usize>,
        labels: Vec<String>,
        rows: Vec<Vec<Cell>>,
    ) -> MergeResult<Self> {
        let source = source.into();
        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(MergeError::DuplicateColumn { path: source, label: label.clone() });
            }
        }
        Ok(Self { source, header_row, labels, rows })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Index of the header row in the raw grid, `None` when the marker was absent.
    pub fn header_row(&self) -> Option<usize> {
        self.header_row
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

/// First row holding a string cell exactly equal to `marker`.
pub fn find_header_row(raw: &RawTable, marker: &str) -> Option<usize> {
    raw.rows.iter().position(|row| row.iter().any(|cell| cell.is_token(marker)))
}

/// Trim surrounding whitespace and lower-case.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Promote the marker row to column labels and keep only the rows below it.
///
/// Blank header cells get a positional `unnamed: <index>` label. When the
/// marker never appears, `policy` decides between failing and keeping every
/// row under positional labels (`"0"`, `"1"`, ...).
pub fn normalize_table(
    raw: RawTable,
    marker: &str,
    policy: HeaderPolicy,
) -> MergeResult<NormalizedTable> {
    let width = raw.width();

    let Some(header_idx) = find_header_row(&raw, marker) else {
        return match policy {
            HeaderPolicy::Strict => Err(MergeError::HeaderNotFound {
                path: raw.source,
                marker: marker.to_string(),
            }),
            HeaderPolicy::Fallback => {
                tracing::warn!(
                    "No row in {} contains '{}'; keeping all {} rows with positional column labels",
                    raw.source.display(),
                    marker,
                    raw.rows.len()
                );
                let labels = (0..width).map(|idx| idx.to_string()).collect();
                NormalizedTable::new(raw.source, None, labels, raw.rows)
            }
        };
    };

    let RawTable { source, mut rows } = raw;
    let body = rows.split_off(header_idx + 1);
    let header = rows.pop().unwrap_or_default();

    let labels = (0..width)
        .map(|idx| {
            let label = header.get(idx).map(|cell| normalize_label(&cell.to_string()));
            match label {
                Some(label) if !label.is_empty() => label,
                _ => format!("unnamed: {}", idx),
            }
        })
        .collect();

    NormalizedTable::new(source, Some(header_idx), labels, body)
}
