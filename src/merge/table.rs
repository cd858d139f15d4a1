//! Label-aligned row union of normalized tables

use super::header::NormalizedTable;
use super::request::ColumnRequest;
use crate::domain::Cell;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub label: String,
    pub values: Vec<Cell>,
}

/// Ordered mapping from column label to column data.
///
/// Every column always holds exactly `row_count` values. Labels keep their
/// first-seen order across appended tables.
#[derive(Debug, Clone, Default)]
pub struct MergedTable {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    row_count: usize,
}

/// The projected result: labels in request order, rows in merge order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl MergedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn labels(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.label.clone()).collect()
    }

    pub fn column(&self, label: &str) -> Option<&[Cell]> {
        self.index.get(label).map(|&idx| self.columns[idx].values.as_slice())
    }

    /// Append `table`'s rows below the existing ones.
    ///
    /// Labels new to the merge are added as columns back-filled with empty
    /// cells for every earlier row; existing labels the table lacks get empty
    /// cells for the appended rows.
    pub fn append(&mut self, table: &NormalizedTable) {
        let positions: Vec<usize> =
            table.labels().iter().map(|label| self.column_index_or_insert(label)).collect();

        for row in table.rows() {
            for (src, &dst) in positions.iter().enumerate() {
                self.columns[dst].values.push(row.get(src).cloned().unwrap_or_default());
            }
        }

        self.row_count += table.rows().len();
        for column in &mut self.columns {
            column.values.resize(self.row_count, Cell::Empty);
        }
    }

    fn column_index_or_insert(&mut self, label: &str) -> usize {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.columns.len();
        self.columns
            .push(Column { label: label.to_string(), values: vec![Cell::Empty; self.row_count] });
        self.index.insert(label.to_string(), idx);
        idx
    }

    /// Requested labels that exist in the merge, in request order.
    pub fn matched_columns(&self, request: &ColumnRequest) -> Vec<String> {
        request
            .names()
            .iter()
            .filter(|name| self.index.contains_key(name.as_str()))
            .cloned()
            .collect()
    }

    /// Restrict to `labels` (in that order), keeping row order. Unknown labels are ignored.
    pub fn project(&self, labels: &[String]) -> OutputTable {
        let selected: Vec<(&String, &[Cell])> = labels
            .iter()
            .filter_map(|label| self.column(label).map(|values| (label, values)))
            .collect();

        let rows = (0..self.row_count)
            .map(|row| selected.iter().map(|(_, values)| values[row].clone()).collect())
            .collect();

        OutputTable { columns: selected.into_iter().map(|(label, _)| label.clone()).collect(), rows }
    }
}
