//! Uploading datasets into a SQLite database.

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use rusqlite::Connection;
use tempfile::TempDir;

use xlmerge_model::{CellValue, frame_from_cells};
use xlmerge_sql::{DatabaseConfig, DatabaseError, TableUploader};

fn uploader(dir: &TempDir) -> TableUploader {
    TableUploader::new(DatabaseConfig::new(dir.path().join("store.db")))
}

fn orders(rows: usize) -> DataFrame {
    let day = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    frame_from_cells(&[
        (
            "order_id".to_string(),
            (0..rows).map(|i| CellValue::Int(i as i64)).collect(),
        ),
        (
            "total".to_string(),
            (0..rows).map(|i| CellValue::Float(i as f64 + 0.5)).collect(),
        ),
        (
            "placed".to_string(),
            (0..rows).map(|_| CellValue::Date(day)).collect(),
        ),
        (
            "customer".to_string(),
            (0..rows).map(|i| CellValue::text(format!("c{i}"))).collect(),
        ),
    ])
    .unwrap()
}

fn declared_types(db: &std::path::Path, table: &str) -> Vec<(String, String)> {
    let conn = Connection::open(db).unwrap();
    let mut stmt = conn
        .prepare("SELECT name, type FROM pragma_table_info(?1) ORDER BY cid")
        .unwrap();
    stmt.query_map([table], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .map(Result::unwrap)
        .collect()
}

#[test]
fn creates_table_with_inferred_types() {
    let dir = TempDir::new().unwrap();
    let uploader = uploader(&dir);

    let report = uploader.upload(&orders(3), "orders").unwrap();

    assert_eq!(report.rows_inserted, 3);
    assert_eq!(report.columns, 4);
    assert_eq!(uploader.count_rows("orders").unwrap(), 3);
    assert_eq!(
        declared_types(uploader.database_path(), "orders"),
        vec![
            ("order_id".to_string(), "INTEGER".to_string()),
            ("total".to_string(), "DOUBLE PRECISION".to_string()),
            ("placed".to_string(), "DATE".to_string()),
            ("customer".to_string(), "VARCHAR(255)".to_string()),
        ]
    );

    let conn = Connection::open(uploader.database_path()).unwrap();
    let (placed, total): (String, f64) = conn
        .query_row(
            "SELECT placed, total FROM orders WHERE order_id = 2",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(placed, "2024-04-01");
    assert!((total - 2.5).abs() < f64::EPSILON);
}

#[test]
fn rerun_replaces_previous_rows() {
    let dir = TempDir::new().unwrap();
    let uploader = uploader(&dir);

    uploader.upload(&orders(5), "orders").unwrap();
    uploader.upload(&orders(2), "orders").unwrap();

    assert_eq!(uploader.count_rows("orders").unwrap(), 2);
}

#[test]
fn missing_values_are_stored_as_null() {
    let dir = TempDir::new().unwrap();
    let uploader = uploader(&dir);
    let df = frame_from_cells(&[
        ("a".to_string(), vec![CellValue::Int(1), CellValue::Empty]),
        ("b".to_string(), vec![CellValue::Empty, CellValue::text("x")]),
    ])
    .unwrap();

    uploader.upload(&df, "gaps").unwrap();

    let conn = Connection::open(uploader.database_path()).unwrap();
    let nulls: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM gaps WHERE a IS NULL OR b IS NULL",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(nulls, 2);
}

#[test]
fn hostile_table_name_is_just_a_name() {
    let dir = TempDir::new().unwrap();
    let uploader = uploader(&dir);
    uploader.upload(&orders(1), "keep").unwrap();

    let hostile = "x\"; DROP TABLE keep; --";
    uploader.upload(&orders(2), hostile).unwrap();

    assert_eq!(uploader.count_rows("keep").unwrap(), 1);
    assert_eq!(uploader.count_rows(hostile).unwrap(), 2);
}

#[test]
fn hostile_column_name_is_just_a_name() {
    let dir = TempDir::new().unwrap();
    let uploader = uploader(&dir);
    let df = frame_from_cells(&[(
        "v\" INTEGER); DROP TABLE t; --".to_string(),
        vec![CellValue::Int(1)],
    )])
    .unwrap();

    uploader.upload(&df, "t").unwrap();

    let columns = declared_types(uploader.database_path(), "t");
    assert_eq!(columns[0].0, "v\" INTEGER); DROP TABLE t; --");
}

#[test]
fn too_long_text_is_rejected_and_old_table_kept() {
    let dir = TempDir::new().unwrap();
    let uploader = uploader(&dir);
    uploader.upload(&orders(4), "orders").unwrap();

    let df = frame_from_cells(&[
        ("order_id".to_string(), vec![CellValue::Int(9)]),
        ("customer".to_string(), vec![CellValue::text("y".repeat(300))]),
    ])
    .unwrap();
    let err = uploader.upload(&df, "orders").unwrap_err();

    assert!(matches!(err, DatabaseError::ValueTooLong { length: 300, .. }));
    assert_eq!(uploader.count_rows("orders").unwrap(), 4);
}

#[test]
fn empty_table_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let err = uploader(&dir).upload(&orders(1), "  ").unwrap_err();
    assert!(matches!(err, DatabaseError::InvalidIdentifier { .. }));
}

#[test]
fn unopenable_database_is_an_error() {
    let dir = TempDir::new().unwrap();
    let uploader = TableUploader::new(DatabaseConfig::new(dir.path().join("no/such/dir/x.db")));
    let err = uploader.upload(&orders(1), "orders").unwrap_err();
    assert!(matches!(err, DatabaseError::Open { .. }));
}
