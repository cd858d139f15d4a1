//! Requested output columns

use super::header::normalize_label;

/// Ordered, normalized column names parsed from a comma-separated list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnRequest {
    names: Vec<String>,
}

impl ColumnRequest {
    /// Split on commas, normalize each piece the way header labels are
    /// normalized, drop empty pieces and repeated names.
    pub fn parse(text: &str) -> Self {
        let mut names: Vec<String> = Vec::new();
        for name in text.split(',').map(normalize_label).filter(|name| !name.is_empty()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}
