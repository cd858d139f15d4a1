//! Input discovery: explicit files and spreadsheet directories

use crate::domain::{normalize_extension, ScanStats};
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collects the spreadsheets to merge, in a deterministic order.
///
/// Explicit files keep the order they were given in; each directory
/// contributes its matching files sorted by path.
pub struct InputScanner {
    include_extensions: Vec<String>,
    exclude_globs: Vec<String>,
    recursive: bool,
    skip_paths: Vec<PathBuf>,
    stats: ScanStats,
}

impl InputScanner {
    /// Create a new InputScanner with default settings.
    pub fn new() -> Self {
        Self {
            include_extensions: crate::domain::default_include_extensions()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude_globs: crate::domain::default_exclude_globs()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            recursive: false,
            skip_paths: Vec::new(),
            stats: ScanStats::default(),
        }
    }

    /// Set file extensions to include (e.g., ".xlsx", "xls")
    pub fn include_extensions(mut self, extensions: Vec<String>) -> Self {
        self.include_extensions = extensions.iter().map(|e| normalize_extension(e)).collect();
        self
    }

    /// Set file-name glob patterns to exclude
    pub fn exclude_globs(mut self, globs: Vec<String>) -> Self {
        self.exclude_globs = globs;
        self
    }

    /// Descend into subdirectories of directory inputs
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Never return these files, even when a directory input contains them.
    ///
    /// Paths that do not exist yet are dropped; they cannot be scanned either.
    pub fn skip_paths(mut self, paths: &[PathBuf]) -> Self {
        self.skip_paths = paths.iter().filter_map(|p| p.canonicalize().ok()).collect();
        self
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    fn build_exclude_globset(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude_globs {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => tracing::warn!("Ignoring invalid exclude glob '{}': {}", pattern, e),
            }
        }
        Ok(builder.build()?)
    }

    fn should_include_extension(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext.is_empty() {
            return false;
        }
        self.include_extensions.contains(&normalize_extension(ext))
    }

    /// Resolve `inputs` (files or directories) to the list of spreadsheets.
    pub fn scan(&mut self, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
        self.stats = ScanStats::default();
        let exclude = self.build_exclude_globset()?;
        let mut files = Vec::new();

        for input in inputs {
            let metadata = std::fs::metadata(input)
                .with_context(|| format!("Input path does not exist: {}", input.display()))?;

            if metadata.is_dir() {
                let max_depth = if self.recursive { usize::MAX } else { 1 };
                let mut found = Vec::new();
                for entry in WalkDir::new(input).min_depth(1).max_depth(max_depth) {
                    let entry = entry
                        .with_context(|| format!("Failed listing directory {}", input.display()))?;
                    if entry.file_type().is_file() {
                        found.push(entry.into_path());
                    }
                }
                found.sort();
                for path in found {
                    self.consider(path, &exclude, &mut files, false);
                }
            } else {
                self.consider(input.clone(), &exclude, &mut files, true);
            }
        }

        tracing::debug!(
            "Scanned {} files, {} spreadsheets included",
            self.stats.files_scanned,
            self.stats.files_included
        );
        Ok(files)
    }

    fn consider(
        &mut self,
        path: PathBuf,
        exclude: &GlobSet,
        files: &mut Vec<PathBuf>,
        explicit: bool,
    ) {
        self.stats.files_scanned += 1;

        if !self.should_include_extension(&path) {
            self.stats.files_skipped_extension += 1;
            if explicit {
                tracing::warn!("Skipping {}: not a supported spreadsheet extension", path.display());
            }
            return;
        }

        if self.is_skipped(&path) {
            self.stats.files_skipped_output += 1;
            tracing::info!("Skipping {}: it is the merge output", path.display());
            return;
        }

        let name = path.file_name().map(Path::new).unwrap_or(path.as_path());
        if exclude.is_match(name) {
            self.stats.files_skipped_glob += 1;
            tracing::debug!("Skipping {}: matches an exclude glob", path.display());
            return;
        }

        self.stats.files_included += 1;
        files.push(path);
    }

    fn is_skipped(&self, path: &Path) -> bool {
        if self.skip_paths.is_empty() {
            return false;
        }
        path.canonicalize().map(|p| self.skip_paths.contains(&p)).unwrap_or(false)
    }
}

impl Default for InputScanner {
    fn default() -> Self {
        Self::new()
    }
}
