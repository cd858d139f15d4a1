//! Spreadsheet input discovery

use crate::domain::{Config, ScanStats};
use anyhow::Result;
use std::path::PathBuf;

pub mod scanner;

pub use scanner::InputScanner;

/// Resolve `inputs` using the extension/glob/recursion settings from `config`.
///
/// Files in `skip` (typically the merge destination) are never returned.
pub fn scan_inputs(
    inputs: &[PathBuf],
    config: &Config,
    skip: &[PathBuf],
) -> Result<(Vec<PathBuf>, ScanStats)> {
    let mut scanner = InputScanner::new()
        .include_extensions(config.include_extensions.clone())
        .exclude_globs(config.exclude_globs.clone())
        .recursive(config.recursive)
        .skip_paths(skip);
    let files = scanner.scan(inputs)?;
    let stats = scanner.stats().clone();
    Ok((files, stats))
}
