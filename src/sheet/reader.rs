//! Spreadsheet loading via calamine

use crate::domain::{Cell, RawTable};
use crate::error::{MergeError, MergeResult};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// Load the first worksheet of `path` as a raw grid.
///
/// Nothing is interpreted as a header. Rows and columns keep their sheet
/// coordinates: leading blank rows/columns that calamine trims from the
/// used range are padded back in as empty cells.
pub fn read_raw_table(path: &Path) -> MergeResult<RawTable> {
    let mut workbook = open_workbook_auto(path).map_err(|e| MergeError::unreadable(path, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| MergeError::EmptyWorkbook { path: path.to_path_buf() })?
        .map_err(|e| MergeError::unreadable(path, e))?;

    let rows = range_to_rows(&range);
    tracing::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(RawTable::new(path, rows))
}

fn range_to_rows(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let Some((first_row, first_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(first_row as usize + range.height());
    rows.resize_with(first_row as usize, Vec::new);

    for row in range.rows() {
        let mut cells = Vec::with_capacity(first_col as usize + row.len());
        cells.resize(first_col as usize, Cell::Empty);
        cells.extend(row.iter().map(convert_cell));
        rows.push(cells);
    }

    rows
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::String(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::String(s.clone()),
        Data::Error(e) => Cell::Error(e.to_string()),
    }
}
