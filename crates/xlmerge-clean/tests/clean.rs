//! Cleaning behavior over whole datasets.

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use proptest::prelude::*;

use xlmerge_clean::{clean_dataset, clean_or_original};
use xlmerge_model::{CellValue, column_cells, frame_from_cells};

fn rows_of(df: &DataFrame) -> Vec<Vec<CellValue>> {
    let columns: Vec<Vec<CellValue>> = df.get_columns().iter().map(column_cells).collect();
    (0..df.height())
        .map(|row| columns.iter().map(|cells| cells[row].clone()).collect())
        .collect()
}

fn frame(rows: &[(Option<i64>, Option<&str>)]) -> DataFrame {
    let ids = rows
        .iter()
        .map(|(id, _)| id.map_or(CellValue::Empty, CellValue::Int))
        .collect();
    let names = rows
        .iter()
        .map(|(_, name)| name.map_or(CellValue::Empty, CellValue::text))
        .collect();
    frame_from_cells(&[("id".to_string(), ids), ("name".to_string(), names)]).unwrap()
}

#[test]
fn keeps_first_occurrence_in_order() {
    let df = frame(&[
        (Some(3), Some("c")),
        (Some(1), Some("a")),
        (Some(3), Some("c")),
        (Some(2), None),
        (Some(1), Some("a")),
        (Some(4), Some("d")),
    ]);

    let cleaned = clean_dataset(&df).unwrap();

    let expected = frame(&[
        (Some(3), Some("c")),
        (Some(1), Some("a")),
        (Some(4), Some("d")),
    ]);
    assert_eq!(rows_of(&cleaned.data), rows_of(&expected));
    assert_eq!(cleaned.report.duplicate_rows, 2);
    assert_eq!(cleaned.report.incomplete_rows, 1);
}

#[test]
fn missing_values_compare_equal_for_duplicates() {
    let df = frame(&[(None, Some("x")), (None, Some("x"))]);
    let cleaned = clean_dataset(&df).unwrap();
    assert_eq!(cleaned.report.duplicate_rows, 1);
    assert_eq!(cleaned.report.incomplete_rows, 1);
    assert_eq!(cleaned.data.height(), 0);
}

#[test]
fn columns_and_types_survive_cleaning() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let df = frame_from_cells(&[
        (
            "when".to_string(),
            vec![CellValue::Date(day), CellValue::Date(day), CellValue::Empty],
        ),
        (
            "amount".to_string(),
            vec![
                CellValue::Float(1.5),
                CellValue::Float(1.5),
                CellValue::Float(2.0),
            ],
        ),
    ])
    .unwrap();

    let cleaned = clean_dataset(&df).unwrap();

    assert_eq!(cleaned.data.height(), 1);
    assert_eq!(cleaned.data.schema(), df.schema());
}

#[test]
fn number_and_its_text_are_different_rows() {
    let df = frame_from_cells(&[
        (
            "code".to_string(),
            vec![CellValue::Int(1), CellValue::text("1"), CellValue::Int(1)],
        ),
        (
            "region".to_string(),
            vec![
                CellValue::text("north"),
                CellValue::text("north"),
                CellValue::text("north"),
            ],
        ),
    ])
    .unwrap();

    let cleaned = clean_dataset(&df).unwrap();
    assert_eq!(cleaned.report.duplicate_rows, 1);
    assert_eq!(cleaned.report.output_rows, 2);
    assert_eq!(
        column_cells(cleaned.data.column("code").unwrap()),
        vec![CellValue::Int(1), CellValue::text("1")]
    );
}

#[test]
fn bool_and_text_true_are_different_rows() {
    let df = frame_from_cells(&[(
        "flag".to_string(),
        vec![CellValue::Bool(true), CellValue::text("true")],
    )])
    .unwrap();

    let cleaned = clean_dataset(&df).unwrap();
    assert_eq!(cleaned.report.duplicate_rows, 0);
    assert_eq!(cleaned.data.height(), 2);
}

#[test]
fn fully_missing_dataset_cleans_to_empty() {
    let df = frame(&[(None, None), (None, None), (None, None)]);
    let (data, outcome) = clean_or_original(df);
    assert_eq!(outcome.unwrap().incomplete_rows, 3);
    assert_eq!(data.height(), 0);
    assert_eq!(data.width(), 2);
}

fn arb_rows() -> impl Strategy<Value = Vec<(Option<i64>, Option<String>)>> {
    prop::collection::vec(
        (
            prop::option::weighted(0.8, 0i64..4),
            prop::option::weighted(0.8, "[ab]"),
        ),
        0..40,
    )
}

fn arb_frame() -> impl Strategy<Value = DataFrame> {
    arb_rows().prop_map(|rows| {
        let borrowed: Vec<(Option<i64>, Option<&str>)> = rows
            .iter()
            .map(|(id, name)| (*id, name.as_deref()))
            .collect();
        frame(&borrowed)
    })
}

proptest! {
    #[test]
    fn output_rows_come_from_input(df in arb_frame()) {
        let input = rows_of(&df);
        let cleaned = clean_dataset(&df).unwrap();
        for row in rows_of(&cleaned.data) {
            prop_assert!(input.contains(&row));
        }
    }

    #[test]
    fn output_has_no_duplicates_or_missing(df in arb_frame()) {
        let cleaned = clean_dataset(&df).unwrap();
        let rows = rows_of(&cleaned.data);
        for (idx, row) in rows.iter().enumerate() {
            prop_assert!(row.iter().all(|cell| !cell.is_missing()));
            prop_assert!(!rows[..idx].contains(row));
        }
    }

    #[test]
    fn cleaning_is_idempotent(df in arb_frame()) {
        let once = clean_dataset(&df).unwrap();
        let twice = clean_dataset(&once.data).unwrap();
        prop_assert_eq!(rows_of(&once.data), rows_of(&twice.data));
        prop_assert_eq!(twice.report.removed_rows(), 0);
    }

    #[test]
    fn report_accounts_for_every_row(df in arb_frame()) {
        let report = clean_dataset(&df).unwrap().report;
        prop_assert_eq!(report.input_rows, df.height());
        prop_assert_eq!(report.input_rows, report.output_rows + report.removed_rows());
    }
}
