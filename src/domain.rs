//! Core data types shared by the reader, merger and writer

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Literal token that identifies the real header row of an export.
pub const DEFAULT_HEADER_MARKER: &str = "Código";

/// File name used when the caller only names an output directory.
pub const DEFAULT_OUTPUT_NAME: &str = "planilha_organizada.xlsx";

pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

pub fn default_include_extensions() -> &'static [&'static str] {
    &[".xlsx", ".xls"]
}

pub fn default_exclude_globs() -> &'static [&'static str] {
    // Office lock files left next to an open workbook
    &["~$*"]
}

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Error(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// True when the cell is a string exactly equal to `token`.
    pub fn is_token(&self, token: &str) -> bool {
        matches!(self, Cell::String(s) if s == token)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::String(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::String(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::String(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Cell::Error(e) => f.write_str(e),
        }
    }
}

/// Every row of one input file, no header assumed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub source: PathBuf,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(source: impl Into<PathBuf>, rows: Vec<Vec<Cell>>) -> Self {
        Self { source: source.into(), rows }
    }

    /// Widest row in the grid.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// What to do with a file whose rows never contain the header marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderPolicy {
    /// Keep every row and label columns by position, logging a warning.
    #[default]
    Fallback,
    /// Abort the merge.
    Strict,
}

impl std::str::FromStr for HeaderPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fallback" => Ok(HeaderPolicy::Fallback),
            "strict" => Ok(HeaderPolicy::Strict),
            other => {
                anyhow::bail!("Invalid header policy '{}' (expected fallback|strict)", other)
            }
        }
    }
}

/// Resolved configuration for one merge request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub header_marker: String,
    pub header_policy: HeaderPolicy,
    #[serde(deserialize_with = "extensions_from_string_or_list")]
    pub include_extensions: Vec<String>,
    #[serde(deserialize_with = "list_from_string_or_list")]
    pub exclude_globs: Vec<String>,
    pub recursive: bool,
    pub output_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            header_marker: DEFAULT_HEADER_MARKER.to_string(),
            header_policy: HeaderPolicy::default(),
            include_extensions: default_include_extensions()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude_globs: default_exclude_globs().iter().map(|s| s.to_string()).collect(),
            recursive: false,
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    String(String),
    List(Vec<String>),
}

impl StringOrList {
    fn into_items(self) -> Vec<String> {
        let raw = match self {
            StringOrList::String(s) => s.split(',').map(str::to_string).collect(),
            StringOrList::List(items) => items,
        };
        raw.into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

fn list_from_string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StringOrList::deserialize(deserializer)?.into_items())
}

fn extensions_from_string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StringOrList::deserialize(deserializer)?
        .into_items()
        .into_iter()
        .map(|ext| normalize_extension(&ext))
        .collect())
}

/// Lower-case an extension and give it a leading dot.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

/// Input discovery counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub files_included: usize,
    pub files_skipped_extension: usize,
    pub files_skipped_glob: usize,
    /// Files skipped because they are the merge destination itself.
    pub files_skipped_output: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_match_is_exact() {
        assert!(Cell::from("Código").is_token("Código"));
        assert!(!Cell::from(" Código").is_token("Código"));
        assert!(!Cell::from("código").is_token("Código"));
        assert!(!Cell::Int(1).is_token("1"));
    }

    #[test]
    fn cell_display_renders_plain_text() {
        assert_eq!(Cell::Empty.to_string(), "");
        assert_eq!(Cell::Int(42).to_string(), "42");
        assert_eq!(Cell::Float(2.5).to_string(), "2.5");
        assert_eq!(Cell::Bool(true).to_string(), "TRUE");
    }

    #[test]
    fn header_policy_parses_case_insensitively() {
        assert_eq!("STRICT".parse::<HeaderPolicy>().unwrap(), HeaderPolicy::Strict);
        assert_eq!("fallback".parse::<HeaderPolicy>().unwrap(), HeaderPolicy::Fallback);
        assert!("lenient".parse::<HeaderPolicy>().is_err());
    }

    #[test]
    fn extensions_normalized() {
        assert_eq!(normalize_extension("XLSX"), ".xlsx");
        assert_eq!(normalize_extension(" .xls "), ".xls");
    }

    #[test]
    fn raw_table_width_handles_ragged_rows() {
        let table = RawTable::new("a.xlsx", vec![vec![Cell::Empty], vec![Cell::Empty; 3]]);
        assert_eq!(table.width(), 3);
    }
}
