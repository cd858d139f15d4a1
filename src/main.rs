//! sheet-merge: merge spreadsheet exports into one filtered workbook

use anyhow::Result;

fn main() -> Result<()> {
    sheet_merge::cli::run()
}
