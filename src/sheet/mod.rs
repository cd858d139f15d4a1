//! Spreadsheet I/O (read `.xlsx`/`.xls`, write `.xlsx`)

pub mod reader;
pub mod writer;

pub use reader::read_raw_table;
pub use writer::write_output_table;
