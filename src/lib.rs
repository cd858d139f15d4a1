//! sheet-merge: merge spreadsheet exports into one filtered workbook
//!
//! Each input workbook may carry title or metadata rows above its real
//! header. The header is located by a marker cell (`Código` by default),
//! labels are normalized, all rows are unioned by label and the result is
//! projected onto the requested columns.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod merge;
pub mod render;
pub mod scan;
pub mod sheet;
pub mod workspace;

pub use domain::{Cell, Config, HeaderPolicy, RawTable};
pub use error::{MergeError, MergeResult};
pub use merge::{merge_and_filter, ColumnRequest, MergedTable, OutputTable};
