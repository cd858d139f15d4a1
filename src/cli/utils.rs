//! Shared CLI utilities.

use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::CliOverrides;
use crate::domain::HeaderPolicy;

/// Input selection and header detection flags shared by `merge` and `inspect`.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Spreadsheet files or directories containing them
    #[arg(value_name = "INPUTS", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Path to config file (sheet-merge.toml or .sheet-merge.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Cell text that marks the header row
    #[arg(long, value_name = "TEXT")]
    pub header_marker: Option<String>,

    /// What to do when a file has no header row: fallback|strict
    #[arg(long, value_name = "POLICY")]
    pub header_policy: Option<String>,

    /// Accept only these extensions (comma-separated, e.g., '.xlsx,.xls')
    #[arg(short = 'i', long, value_name = "EXTS")]
    pub include_ext: Option<String>,

    /// Skip files whose name matches these globs (comma-separated)
    #[arg(short = 'e', long, value_name = "GLOBS")]
    pub exclude_glob: Option<String>,

    /// Descend into subdirectories of directory inputs
    #[arg(short = 'r', long)]
    pub recursive: bool,
}

impl SourceArgs {
    pub fn overrides(&self) -> anyhow::Result<CliOverrides> {
        let header_policy =
            self.header_policy.as_deref().map(str::parse::<HeaderPolicy>).transpose()?;
        Ok(CliOverrides {
            header_marker: self.header_marker.clone(),
            header_policy,
            include_extensions: parse_csv(&self.include_ext),
            exclude_globs: parse_csv(&self.exclude_glob),
            recursive: self.recursive,
            output_name: None,
        })
    }

    /// Directory searched for an auto-discovered config file.
    pub fn config_search_root(&self) -> PathBuf {
        match self.inputs.first() {
            Some(first) if first.is_dir() => first.clone(),
            Some(first) => match first.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            },
            None => PathBuf::from("."),
        }
    }
}

/// Parse a comma-separated string into a `Vec<String>`, trimming whitespace and
/// discarding empty segments.  Returns `None` when `value` is `None`.
pub fn parse_csv(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.to_string())
            .collect::<Vec<_>>()
    })
}

/// Where the merged workbook goes: an explicit file, `output_name` inside an
/// explicit directory, or `output_name` in the current directory.
pub fn resolve_output_path(output: Option<&Path>, output_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(output_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(output_name),
    }
}
