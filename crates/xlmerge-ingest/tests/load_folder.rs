//! Integration tests for folder loading.

use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::DataType;
use rust_xlsxwriter::{Format, Workbook};
use tempfile::TempDir;

use xlmerge_ingest::{IngestError, list_spreadsheet_files, load_folder, load_workbook};

enum Fixture {
    Num(f64),
    Text(&'static str),
    Date(NaiveDate),
    Blank,
}

fn write_workbook(path: &Path, headers: &[&str], rows: &[Vec<Fixture>]) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let sheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = row_idx as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            let col = col as u16;
            match value {
                Fixture::Num(v) => {
                    sheet.write_number(row_num, col, *v).unwrap();
                }
                Fixture::Text(s) => {
                    sheet.write_string(row_num, col, *s).unwrap();
                }
                Fixture::Date(d) => {
                    sheet
                        .write_datetime_with_format(row_num, col, d, &date_format)
                        .unwrap();
                }
                Fixture::Blank => {}
            }
        }
    }
    workbook.save(path).unwrap();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn merges_files_with_identical_columns() {
    let dir = TempDir::new().unwrap();
    write_workbook(
        &dir.path().join("jan.xlsx"),
        &["id", "amount", "region"],
        &[
            vec![Fixture::Num(1.0), Fixture::Num(9.5), Fixture::Text("north")],
            vec![Fixture::Num(2.0), Fixture::Num(3.25), Fixture::Text("south")],
        ],
    );
    write_workbook(
        &dir.path().join("feb.xlsx"),
        &["id", "amount", "region"],
        &[vec![
            Fixture::Num(3.0),
            Fixture::Num(1.0),
            Fixture::Text("east"),
        ]],
    );
    write_workbook(&dir.path().join("mar.xlsx"), &["id", "amount", "region"], &[]);

    let loaded = load_folder(dir.path()).unwrap();

    assert!(!loaded.no_files_found());
    assert_eq!(loaded.files.len(), 3);
    assert_eq!(loaded.data.height(), 3);
    assert_eq!(loaded.data.width(), 3);
    assert_eq!(loaded.data.column("id").unwrap().dtype(), &DataType::Int64);
    assert_eq!(
        loaded.data.column("amount").unwrap().dtype(),
        &DataType::Float64
    );
    assert_eq!(
        loaded.data.column("region").unwrap().dtype(),
        &DataType::String
    );
}

#[test]
fn files_are_merged_in_name_order() {
    let dir = TempDir::new().unwrap();
    write_workbook(
        &dir.path().join("b.xlsx"),
        &["n"],
        &[vec![Fixture::Num(2.0)]],
    );
    write_workbook(
        &dir.path().join("a.xlsx"),
        &["n"],
        &[vec![Fixture::Num(1.0)]],
    );

    let loaded = load_folder(dir.path()).unwrap();
    let first = loaded.data.column("n").unwrap().get(0).unwrap();
    assert_eq!(first.to_string(), "1");
}

#[test]
fn mismatched_columns_produce_missing_values() {
    let dir = TempDir::new().unwrap();
    write_workbook(
        &dir.path().join("a.xlsx"),
        &["id", "score"],
        &[vec![Fixture::Num(1.0), Fixture::Num(0.5)]],
    );
    write_workbook(
        &dir.path().join("b.xlsx"),
        &["id", "comment"],
        &[vec![Fixture::Num(2.0), Fixture::Text("late")]],
    );

    let loaded = load_folder(dir.path()).unwrap();

    assert_eq!(loaded.data.height(), 2);
    assert_eq!(loaded.data.width(), 3);
    assert_eq!(loaded.data.column("score").unwrap().null_count(), 1);
    assert_eq!(loaded.data.column("comment").unwrap().null_count(), 1);
}

#[test]
fn empty_folder_signals_no_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("readme.txt"), "not a workbook").unwrap();

    let loaded = load_folder(dir.path()).unwrap();

    assert!(loaded.no_files_found());
    assert_eq!(loaded.data.height(), 0);
    assert_eq!(loaded.data.width(), 0);
}

#[test]
fn unparsable_file_fails_the_whole_load() {
    let dir = TempDir::new().unwrap();
    write_workbook(
        &dir.path().join("good.xlsx"),
        &["id"],
        &[vec![Fixture::Num(1.0)]],
    );
    std::fs::write(dir.path().join("broken.xlsx"), b"this is not a zip archive").unwrap();

    let err = load_folder(dir.path()).unwrap_err();
    assert!(matches!(err, IngestError::WorkbookOpen { .. }));
    assert!(err.to_string().contains("broken.xlsx"));
}

#[test]
fn missing_folder_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let err = load_folder(&dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}

#[test]
fn dates_blanks_and_headers_are_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("visits.xlsx");
    write_workbook(
        &path,
        &["visit", "", "visit"],
        &[
            vec![
                Fixture::Date(date(2024, 1, 15)),
                Fixture::Text("x"),
                Fixture::Num(1.0),
            ],
            vec![Fixture::Blank, Fixture::Blank, Fixture::Blank],
            vec![
                Fixture::Date(date(2024, 2, 1)),
                Fixture::Blank,
                Fixture::Num(2.0),
            ],
        ],
    );

    let df = load_workbook(&path).unwrap();

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(names, vec!["visit", "Unnamed: 1", "visit.1"]);
    // The fully blank row is not a record.
    assert_eq!(df.height(), 2);
    assert_eq!(df.column("visit").unwrap().dtype(), &DataType::Date);
    assert_eq!(df.column("Unnamed: 1").unwrap().null_count(), 1);
}

#[test]
fn listing_ignores_other_extensions() {
    let dir = TempDir::new().unwrap();
    write_workbook(&dir.path().join("one.xlsx"), &["a"], &[]);
    std::fs::write(dir.path().join("two.csv"), "a\n1\n").unwrap();

    let files = list_spreadsheet_files(dir.path()).unwrap();
    assert_eq!(files.len(), 1);
}
