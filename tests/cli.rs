use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use calamine::{Data, DataType, Reader, Xlsx};
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;
use zip::ZipArchive;

fn write_workbook(dir: &Path, name: &str, header: &[&str], rows: &[&[&str]]) -> PathBuf {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *name).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            let (row_num, col_num) = (r as u32 + 1, col as u16);
            if let Some(expr) = value.strip_prefix('=') {
                sheet.write_formula(row_num, col_num, expr).unwrap();
            } else if let Ok(n) = value.parse::<f64>() {
                sheet.write_number(row_num, col_num, n).unwrap();
            } else {
                sheet.write_string(row_num, col_num, *value).unwrap();
            }
        }
    }
    let path = dir.join(name);
    workbook.save(&path).unwrap();
    path
}

fn archive_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
    let bytes = fs::read(path).unwrap();
    let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..zip.len())
        .map(|i| {
            let mut file = zip.by_index(i).unwrap();
            let mut payload = Vec::new();
            file.read_to_end(&mut payload).unwrap();
            (file.name().to_string(), payload)
        })
        .collect()
}

fn sheet_rows(payload: Vec<u8>) -> Vec<Vec<Data>> {
    let mut workbook = Xlsx::new(Cursor::new(payload)).unwrap();
    let name = workbook.sheet_names()[0].clone();
    let range = workbook.worksheet_range(&name).unwrap();
    range.rows().map(|row| row.to_vec()).collect()
}

fn sheetmerge() -> Command {
    Command::cargo_bin("sheetmerge").unwrap()
}

#[test]
fn test_merge_writes_union_and_intersection() {
    let dir = TempDir::new().unwrap();
    let a = write_workbook(dir.path(), "a.xlsx", &["ID", "City"], &[&["1", "NY"], &["2", "LA"]]);
    let b = write_workbook(
        dir.path(),
        "b.xlsx",
        &["id", "Country"],
        &[&["2", "USA"], &["3", "UK"]],
    );
    let out = dir.path().join("out.zip");

    sheetmerge()
        .arg("merge")
        .arg(&a)
        .arg(&b)
        .args(["--column", "ID", "--output"])
        .arg(&out)
        .assert()
        .success();

    let entries = archive_entries(&out);
    let names: Vec<_> = entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["union.xlsx", "intersection.xlsx"]);

    let mut entries = entries.into_iter();
    let union = sheet_rows(entries.next().unwrap().1);
    assert_eq!(union[0], vec![
        Data::String("ID".into()),
        Data::String("City".into()),
        Data::String("id".into()),
        Data::String("Country".into()),
    ]);
    // Header plus 1 A-only, 1 B-only and 2 rows for the shared key
    assert_eq!(union.len(), 5);

    let intersection = sheet_rows(entries.next().unwrap().1);
    assert_eq!(intersection.len(), 3);
    assert_eq!(intersection[1][0].as_f64(), Some(2.0));
    assert_eq!(intersection[1][1], Data::String("LA".into()));
    assert_eq!(intersection[2][3], Data::String("USA".into()));
}

#[test]
fn test_split_preserves_formulas_and_reports() {
    let dir = TempDir::new().unwrap();
    let input = write_workbook(
        dir.path(),
        "orders.xlsx",
        &["Region", "Qty", "Double"],
        &[&["North", "2", "=B2*2"], &["South", "5", "=B3*2"], &["north", "7", "=B4*2"]],
    );
    let out = dir.path().join("split.zip");

    sheetmerge()
        .arg("split")
        .arg(&input)
        .args(["-c", "region", "--report", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"operation\": \"split\""))
        .stdout(predicate::str::contains("\"name\": \"north.xlsx\""));

    let entries = archive_entries(&out);
    let names: Vec<_> = entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["north.xlsx", "south.xlsx"]);

    let mut workbook = Xlsx::new(Cursor::new(entries[0].1.clone())).unwrap();
    let formulas = workbook.worksheet_formula("Sheet1").unwrap();
    assert_eq!(formulas.get_value((1, 2)).map(String::as_str), Some("B2*2"));
    assert_eq!(formulas.get_value((2, 2)).map(String::as_str), Some("B4*2"));
}

#[test]
fn test_split_csv_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("people.csv");
    fs::write(&input, "Name,Team\nAnn,Red\nBob,Blue\nCid,red\n").unwrap();
    let out = dir.path().join("teams.zip");

    sheetmerge()
        .arg("split")
        .arg(&input)
        .args(["--column", "team", "--format", "csv", "--output"])
        .arg(&out)
        .assert()
        .success();

    let entries = archive_entries(&out);
    assert_eq!(entries[0].0, "red.csv");
    assert_eq!(String::from_utf8(entries[0].1.clone()).unwrap(), "Name,Team\nAnn,Red\nCid,red\n");
    assert_eq!(entries[1].0, "blue.csv");
}

#[test]
fn test_missing_column_is_client_error() {
    let dir = TempDir::new().unwrap();
    let input = write_workbook(dir.path(), "a.xlsx", &["ID", "City"], &[&["1", "NY"]]);
    let out = dir.path().join("none.zip");

    sheetmerge()
        .arg("split")
        .arg(&input)
        .args(["--column", "Zip", "--output"])
        .arg(&out)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Column not found: Zip"));

    assert!(!out.exists());
}

#[test]
fn test_unreadable_spreadsheet_is_client_error() {
    let dir = TempDir::new().unwrap();
    let good = write_workbook(dir.path(), "a.xlsx", &["ID"], &[&["1"]]);
    let bad = dir.path().join("bad.xlsx");
    fs::write(&bad, b"PK\x03\x04 truncated").unwrap();
    let out = dir.path().join("none.zip");

    sheetmerge()
        .arg("merge")
        .arg(&good)
        .arg(&bad)
        .args(["--column", "ID", "--output"])
        .arg(&out)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse input"));

    assert!(!out.exists());
}

#[test]
fn test_unwritable_output_is_server_error() {
    let dir = TempDir::new().unwrap();
    let input = write_workbook(dir.path(), "a.xlsx", &["ID", "City"], &[&["1", "NY"]]);
    let out = dir.path().join("missing").join("out.zip");

    sheetmerge()
        .arg("split")
        .arg(&input)
        .args(["--column", "ID", "--output"])
        .arg(&out)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to write archive"));

    assert!(!out.exists());
}
