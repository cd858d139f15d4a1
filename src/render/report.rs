//! Report JSON generation.

use crate::domain::{ScanStats, REPORT_SCHEMA_VERSION};
use crate::merge::FileSummary;
use anyhow::Result;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::path::Path;

/// Everything a merge run wants to record about itself.
pub struct MergeReport<'a> {
    pub stats: &'a ScanStats,
    pub files: &'a [FileSummary],
    pub requested: &'a [String],
    pub matched: &'a [String],
    pub available: &'a [String],
    pub rows: usize,
    pub output_path: &'a Path,
}

pub fn write_report(
    report_path: &Path,
    report: &MergeReport<'_>,
    include_timestamp: bool,
) -> Result<()> {
    let mut root = Map::new();
    root.insert("schema_version".to_string(), Value::String(REPORT_SCHEMA_VERSION.to_string()));
    if include_timestamp {
        root.insert(
            "generated_at".to_string(),
            Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        );
    }
    root.insert("stats".to_string(), serde_json::to_value(report.stats)?);
    root.insert("files".to_string(), serde_json::to_value(report.files)?);
    root.insert(
        "columns".to_string(),
        json!({
            "requested": report.requested,
            "matched": report.matched,
            "available": report.available,
        }),
    );
    root.insert("rows".to_string(), Value::Number(report.rows.into()));
    root.insert(
        "output".to_string(),
        Value::String(report.output_path.to_string_lossy().replace('\\', "/")),
    );

    if let Some(parent) = report_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(report_path, serde_json::to_string_pretty(&Value::Object(root))?)?;
    Ok(())
}

/// JSON document for `inspect --json`.
pub fn inspection_value(files: &[FileSummary], merged_columns: &[String], rows: usize) -> Value {
    json!({
        "schema_version": REPORT_SCHEMA_VERSION,
        "files": files,
        "merged_columns": merged_columns,
        "rows": rows,
    })
}
