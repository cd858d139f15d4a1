//! Merge command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use super::utils::{resolve_output_path, SourceArgs};
use crate::config::{load_config, merge_cli_with_config};
use crate::merge::{filter_columns, merge_files, ColumnRequest};
use crate::render::{write_report, MergeReport};
use crate::scan::scan_inputs;
use crate::sheet::write_output_table;
use crate::workspace::WorkContext;

#[derive(Args)]
pub struct MergeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Columns to keep, comma-separated, in output order (e.g., 'nome, código')
    #[arg(short = 'k', long, value_name = "LIST", allow_hyphen_values = true)]
    pub columns: String,

    /// Output file, or directory to place the default-named file in
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output file name used when --output is a directory or omitted
    #[arg(long, value_name = "NAME")]
    pub output_name: Option<String>,

    /// Write a JSON report describing the merge
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Omit timestamps from the report for reproducible diffs
    #[arg(long)]
    pub no_timestamp: bool,
}

pub fn run(args: MergeArgs) -> Result<()> {
    let start_time = Instant::now();

    let mut overrides = args.source.overrides()?;
    overrides.output_name = args.output_name.clone();
    let config = load_config(&args.source.config_search_root(), args.source.config.as_deref())?;
    let config = merge_cli_with_config(config, overrides);

    let destination = resolve_output_path(args.output.as_deref(), &config.output_name);

    // A previous run's output may sit inside an input directory.
    let (inputs, stats) = scan_inputs(&args.source.inputs, &config, &[destination.clone()])?;
    tracing::info!("Merging {} spreadsheets", inputs.len());

    let outcome = merge_files(&inputs, &config)?;
    let table = filter_columns(&outcome.merged, &args.columns)?;

    let ctx = WorkContext::for_destination(&destination)?;
    let staged = ctx.staged(&config.output_name);
    write_output_table(&table, &staged)?;
    ctx.persist(&staged, &destination)?;

    if let Some(report_path) = &args.report {
        let request = ColumnRequest::parse(&args.columns);
        let available = outcome.merged.labels();
        write_report(
            report_path,
            &MergeReport {
                stats: &stats,
                files: &outcome.files,
                requested: request.names(),
                matched: &table.columns,
                available: &available,
                rows: table.rows.len(),
                output_path: &destination,
            },
            !args.no_timestamp,
        )
        .with_context(|| format!("Failed writing report {}", report_path.display()))?;
    }

    println!(
        "Merged {} rows from {} files into {} ({} columns: {})",
        table.rows.len(),
        outcome.files.len(),
        destination.display(),
        table.columns.len(),
        table.columns.join(", ")
    );
    tracing::debug!("Merge finished in {:.2?}", start_time.elapsed());

    Ok(())
}
