//! Output rendering (JSON reports)

pub mod report;

pub use report::{inspection_value, write_report, MergeReport};
