//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use sheet_merge::sheet::{read_raw_table, write_output_table};
use sheet_merge::{Cell, OutputTable};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a grid as a workbook; the first row lands in the sheet's first row.
fn write_grid(path: &Path, grid: Vec<Vec<Cell>>) {
    let mut rows = grid.into_iter();
    let first = rows.next().unwrap_or_default();
    let table = OutputTable {
        columns: first.iter().map(|c| c.to_string()).collect(),
        rows: rows.collect(),
    };
    write_output_table(&table, path).expect("write fixture");
}

/// File1: header at row 0 (Código, Nome). File2: title row, then header (Código, Cidade).
fn write_scenario(dir: &Path) -> (PathBuf, PathBuf) {
    let first = dir.join("file1.xlsx");
    write_grid(
        &first,
        vec![
            vec![Cell::from("Código"), Cell::from("Nome")],
            vec![Cell::Int(1), Cell::from("Ana")],
        ],
    );
    let second = dir.join("file2.xlsx");
    write_grid(
        &second,
        vec![
            vec![Cell::from("Relatório mensal")],
            vec![Cell::from("Código"), Cell::from("Cidade")],
            vec![Cell::Int(2), Cell::from("Rio")],
        ],
    );
    (first, second)
}

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("sheet-merge"))
}

#[test]
fn test_cli_version() {
    cmd().arg("--version").assert().success().stdout(predicate::str::contains("sheet-merge"));
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Merge spreadsheet exports"))
        .stdout(predicate::str::contains("merge"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_merge_requires_columns() {
    let tmp = TempDir::new().expect("tmp");
    cmd()
        .args(["merge", tmp.path().to_str().expect("utf8")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--columns"));
}

#[test]
fn test_merge_writes_projected_workbook() {
    let tmp = TempDir::new().expect("tmp");
    let (first, second) = write_scenario(tmp.path());
    let out = tmp.path().join("out").join("merged.xlsx");

    cmd()
        .args([
            "merge",
            first.to_str().expect("utf8"),
            second.to_str().expect("utf8"),
            "--columns",
            "nome, código",
            "--output",
            out.to_str().expect("utf8"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged 2 rows from 2 files"));

    let raw = read_raw_table(&out).expect("read output");
    assert_eq!(raw.rows.len(), 3);
    assert_eq!(raw.rows[0], vec![Cell::from("nome"), Cell::from("código")]);
    assert_eq!(raw.rows[1][0], Cell::from("Ana"));
    assert_eq!(raw.rows[1][1].to_string(), "1");
    assert!(raw.rows[2][0].is_empty());
    assert_eq!(raw.rows[2][1].to_string(), "2");

    // Scratch directories never outlive the request.
    let leftovers: Vec<_> = fs::read_dir(out.parent().expect("parent"))
        .expect("read dir")
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with(".sheet-merge-"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_merge_reports_available_columns_and_writes_nothing() {
    let tmp = TempDir::new().expect("tmp");
    let (first, second) = write_scenario(tmp.path());
    let out = tmp.path().join("merged.xlsx");

    cmd()
        .args([
            "merge",
            first.to_str().expect("utf8"),
            second.to_str().expect("utf8"),
            "--columns",
            "codigo",
            "--output",
            out.to_str().expect("utf8"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Available columns: código, nome, cidade"));

    assert!(!out.exists());
}

#[test]
fn test_merge_directory_uses_default_output_name() {
    let tmp = TempDir::new().expect("tmp");
    let uploads = tmp.path().join("uploads");
    let results = tmp.path().join("results");
    fs::create_dir_all(&uploads).expect("mkdir uploads");
    fs::create_dir_all(&results).expect("mkdir results");
    write_scenario(&uploads);
    fs::write(uploads.join("notes.txt"), "not a spreadsheet").expect("write notes");
    fs::write(uploads.join("~$file1.xlsx"), "lock file").expect("write lock");

    cmd()
        .args([
            "merge",
            uploads.to_str().expect("utf8"),
            "-k",
            "cidade",
            "-o",
            results.to_str().expect("utf8"),
        ])
        .assert()
        .success();

    let raw = read_raw_table(&results.join("planilha_organizada.xlsx")).expect("read output");
    assert_eq!(raw.rows[0], vec![Cell::from("cidade")]);
    // File1 rows come first and have no city.
    assert_eq!(raw.rows.len(), 3);
    assert_eq!(raw.rows[2], vec![Cell::from("Rio")]);
}

#[test]
fn test_merge_current_dir_twice_ignores_previous_output() {
    let tmp = TempDir::new().expect("tmp");
    write_scenario(tmp.path());

    for _ in 0..2 {
        cmd()
            .current_dir(tmp.path())
            .args(["merge", ".", "--columns", "nome, código"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Merged 2 rows from 2 files"));
    }

    let raw = read_raw_table(&tmp.path().join("planilha_organizada.xlsx")).expect("read output");
    assert_eq!(raw.rows.len(), 3);
    assert_eq!(raw.rows[2][1].to_string(), "2");
}

#[test]
fn test_merge_unreadable_file_aborts() {
    let tmp = TempDir::new().expect("tmp");
    let (first, _) = write_scenario(tmp.path());
    let broken = tmp.path().join("broken.xlsx");
    fs::write(&broken, "garbage").expect("write broken");
    let out = tmp.path().join("merged.xlsx");

    cmd()
        .args([
            "merge",
            first.to_str().expect("utf8"),
            broken.to_str().expect("utf8"),
            "--columns",
            "nome",
            "--output",
            out.to_str().expect("utf8"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read spreadsheet"));

    assert!(!out.exists());
}

#[test]
fn test_merge_strict_header_policy() {
    let tmp = TempDir::new().expect("tmp");
    let plain = tmp.path().join("plain.xlsx");
    write_grid(&plain, vec![vec![Cell::from("Id")], vec![Cell::Int(7)]]);

    cmd()
        .args([
            "merge",
            plain.to_str().expect("utf8"),
            "--columns",
            "0",
            "--header-policy",
            "strict",
            "--output",
            tmp.path().join("out.xlsx").to_str().expect("utf8"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("header marker 'Código'"));
}

#[test]
fn test_merge_rejects_invalid_header_policy() {
    let tmp = TempDir::new().expect("tmp");
    let (first, _) = write_scenario(tmp.path());
    cmd()
        .args([
            "merge",
            first.to_str().expect("utf8"),
            "--columns",
            "nome",
            "--header-policy",
            "lenient",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid header policy"));
}

#[test]
fn test_merge_writes_report() {
    let tmp = TempDir::new().expect("tmp");
    let (first, second) = write_scenario(tmp.path());
    let report = tmp.path().join("report.json");

    cmd()
        .args([
            "merge",
            first.to_str().expect("utf8"),
            second.to_str().expect("utf8"),
            "--columns",
            "cidade, missing",
            "--output",
            tmp.path().join("out.xlsx").to_str().expect("utf8"),
            "--report",
            report.to_str().expect("utf8"),
            "--no-timestamp",
        ])
        .assert()
        .success();

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("read report")).expect("json");
    assert!(parsed.get("generated_at").is_none());
    assert_eq!(parsed["rows"], serde_json::json!(2));
    assert_eq!(parsed["columns"]["requested"], serde_json::json!(["cidade", "missing"]));
    assert_eq!(parsed["columns"]["matched"], serde_json::json!(["cidade"]));
    assert_eq!(parsed["files"][1]["header_row"], serde_json::json!(1));
}

#[test]
fn test_config_file_sets_header_marker() {
    let tmp = TempDir::new().expect("tmp");
    let input = tmp.path().join("stock.xlsx");
    write_grid(
        &input,
        vec![
            vec![Cell::from("Inventory export")],
            vec![Cell::from("SKU"), Cell::from("Qty")],
            vec![Cell::from("A-1"), Cell::Int(4)],
        ],
    );
    fs::write(tmp.path().join("sheet-merge.toml"), "header_marker = 'SKU'\n").expect("config");

    cmd()
        .args(["inspect", input.to_str().expect("utf8")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Header row: 2"))
        .stdout(predicate::str::contains("Columns: sku, qty"));
}

#[test]
fn test_inspect_text_output() {
    let tmp = TempDir::new().expect("tmp");
    write_scenario(tmp.path());

    cmd()
        .args(["inspect", tmp.path().to_str().expect("utf8")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Columns: código, cidade"))
        .stdout(predicate::str::contains("Merged columns: código, nome, cidade"))
        .stdout(predicate::str::contains("Total rows: 2"));
}

#[test]
fn test_inspect_json_output() {
    let tmp = TempDir::new().expect("tmp");
    write_scenario(tmp.path());

    let output = cmd()
        .args(["inspect", tmp.path().to_str().expect("utf8"), "--json"])
        .output()
        .expect("run inspect");
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(parsed["merged_columns"], serde_json::json!(["código", "nome", "cidade"]));
    assert_eq!(parsed["files"][0]["header_row"], serde_json::json!(0));
    assert_eq!(parsed["files"][1]["header_row"], serde_json::json!(1));
}

#[test]
fn test_rust_log_overrides_default_level() {
    let tmp = TempDir::new().expect("tmp");
    write_scenario(tmp.path());

    cmd()
        .env("RUST_LOG", "debug")
        .args(["inspect", tmp.path().to_str().expect("utf8")])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));

    cmd()
        .env_remove("RUST_LOG")
        .args(["inspect", tmp.path().to_str().expect("utf8")])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG").not());
}

#[test]
fn test_completions_bash() {
    cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sheet-merge"));
}
