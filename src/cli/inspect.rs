//! Inspect command implementation

use anyhow::Result;
use clap::Args;

use super::utils::SourceArgs;
use crate::config::{load_config, merge_cli_with_config};
use crate::merge::merge_files;
use crate::render::inspection_value;
use crate::scan::scan_inputs;

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print machine-readable JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let config = load_config(&args.source.config_search_root(), args.source.config.as_deref())?;
    let config = merge_cli_with_config(config, args.source.overrides()?);

    let (inputs, stats) = scan_inputs(&args.source.inputs, &config, &[])?;
    let outcome = merge_files(&inputs, &config)?;
    let merged_columns = outcome.merged.labels();

    if args.json {
        let value = inspection_value(&outcome.files, &merged_columns, outcome.merged.row_count());
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for file in &outcome.files {
        println!("File: {}", file.path.display());
        match file.header_row {
            Some(row) => println!("  Header row: {} ('{}')", row + 1, config.header_marker),
            None => println!("  Header row: not found (columns labelled by position)"),
        }
        println!("  Columns: {}", file.columns.join(", "));
        println!("  Data rows: {}", file.rows);
    }

    println!("Merged columns: {}", merged_columns.join(", "));
    println!("Total rows: {}", outcome.merged.row_count());
    println!(
        "Files: {} scanned, {} included, {} skipped (extension), {} skipped (glob)",
        stats.files_scanned,
        stats.files_included,
        stats.files_skipped_extension,
        stats.files_skipped_glob
    );

    Ok(())
}
