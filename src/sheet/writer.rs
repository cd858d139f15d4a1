//! Single-sheet `.xlsx` writer
//!
//! Emits the minimal SpreadsheetML package (content types, relationships,
//! workbook and one worksheet) with inline strings, so no shared string
//! table or style part is needed.

use crate::domain::Cell;
use crate::error::{MergeError, MergeResult};
use crate::merge::OutputTable;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const SHEET_NAME: &str = "Sheet1";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// Write `table` to `path` as a one-sheet workbook: header row first, then
/// the data rows, no index column.
pub fn write_output_table(table: &OutputTable, path: &Path) -> MergeResult<()> {
    let file = File::create(path).map_err(|e| MergeError::write(path, e))?;
    let mut writer = BufWriter::new(file);
    write_workbook(table, &mut writer).map_err(|e| MergeError::write(path, e))?;
    writer.flush().map_err(|e| MergeError::write(path, e))?;
    Ok(())
}

/// Write the workbook package into any seekable sink.
pub fn write_workbook<W: Write + Seek>(table: &OutputTable, sink: W) -> zip::result::ZipResult<()> {
    let mut zip = ZipWriter::new(sink);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(ROOT_RELS.as_bytes())?;

    zip.start_file("xl/workbook.xml", options)?;
    zip.write_all(workbook_xml().as_bytes())?;

    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    zip.write_all(WORKBOOK_RELS.as_bytes())?;

    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    zip.write_all(sheet_xml(table).as_bytes())?;

    zip.finish()?;
    Ok(())
}

fn workbook_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#
        ),
        escape_xml(SHEET_NAME)
    )
}

fn sheet_xml(table: &OutputTable) -> String {
    let mut xml = String::with_capacity(256 + table.rows.len() * table.columns.len() * 32);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#);
    xml.push_str("<sheetData>");

    let header: Vec<Cell> = table.columns.iter().map(|c| Cell::String(c.clone())).collect();
    write_row(&mut xml, 0, &header);
    for (idx, row) in table.rows.iter().enumerate() {
        write_row(&mut xml, idx + 1, row);
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn write_row(xml: &mut String, row_idx: usize, cells: &[Cell]) {
    // NOTE: Excel uses 1-based row numbering
    let row_num = row_idx + 1;
    let _ = write!(xml, r#"<row r="{}">"#, row_num);
    for (col_idx, cell) in cells.iter().enumerate() {
        let cell_ref = format!("{}{}", column_to_letters(col_idx as u32 + 1), row_num);
        write_cell(xml, &cell_ref, cell);
    }
    xml.push_str("</row>");
}

fn write_cell(xml: &mut String, cell_ref: &str, cell: &Cell) {
    let _ = match cell {
        Cell::Empty => Ok(()),
        Cell::String(s) => write_inline_string(xml, cell_ref, s),
        Cell::Int(i) => write!(xml, r#"<c r="{}"><v>{}</v></c>"#, cell_ref, i),
        Cell::Float(f) if f.is_finite() => {
            write!(xml, r#"<c r="{}"><v>{}</v></c>"#, cell_ref, f)
        }
        Cell::Float(f) => write_inline_string(xml, cell_ref, &f.to_string()),
        Cell::Bool(b) => {
            write!(xml, r#"<c r="{}" t="b"><v>{}</v></c>"#, cell_ref, if *b { "1" } else { "0" })
        }
        Cell::Error(e) => write!(xml, r#"<c r="{}" t="e"><v>{}</v></c>"#, cell_ref, escape_xml(e)),
    };
}

fn write_inline_string(xml: &mut String, cell_ref: &str, text: &str) -> std::fmt::Result {
    write!(
        xml,
        r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
        cell_ref,
        escape_xml(text)
    )
}

/// 1-based column number to its letter name (1 -> A, 27 -> AA).
pub fn column_to_letters(col: u32) -> String {
    let mut letters = String::new();
    let mut col = col;

    while col > 0 {
        col -= 1;
        let letter = ((col % 26) as u8 + b'A') as char;
        letters.insert(0, letter);
        col /= 26;
    }

    letters
}

/// Escape markup characters and drop control characters XML 1.0 cannot carry.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}
