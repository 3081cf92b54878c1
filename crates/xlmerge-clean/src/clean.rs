//! Row-level cleaning.

use std::collections::HashSet;
use std::time::Instant;

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};
use tracing::{debug, info, info_span, warn};

use xlmerge_model::{CellValue, column_cells};

use crate::error::{CleanError, Result};
use crate::key::{CellKey, RowKey};

/// Row counts for one cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub input_rows: usize,
    /// Rows dropped as repeats of an earlier row.
    pub duplicate_rows: usize,
    /// Non-duplicate rows dropped for holding a missing value.
    pub incomplete_rows: usize,
    pub output_rows: usize,
}

impl CleanReport {
    pub fn removed_rows(&self) -> usize {
        self.duplicate_rows + self.incomplete_rows
    }
}

/// A cleaned dataset and what was removed from it.
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    pub data: DataFrame,
    pub report: CleanReport,
}

/// Removes duplicate rows, then rows with any missing value.
///
/// Rows are compared across all columns; the first occurrence of a repeated
/// row is kept and missing cells compare equal to each other. Surviving rows
/// keep their relative order. Columns are never added, removed or retyped.
pub fn clean_dataset(df: &DataFrame) -> Result<CleanedDataset> {
    let span = info_span!("clean", rows = df.height(), columns = df.width());
    let _guard = span.enter();
    let start = Instant::now();

    let height = df.height();
    let columns: Vec<(String, Vec<CellValue>)> = df
        .get_columns()
        .iter()
        .map(|column| (column.name().to_string(), column_cells(column)))
        .collect();
    for (name, cells) in &columns {
        if cells.len() != height {
            return Err(CleanError::RaggedColumn {
                column: name.clone(),
                expected: height,
                found: cells.len(),
            });
        }
    }

    let mut seen: HashSet<RowKey> = HashSet::with_capacity(height);
    let mut keep = Vec::with_capacity(height);
    let mut report = CleanReport {
        input_rows: height,
        ..CleanReport::default()
    };
    for row in 0..height {
        let key: RowKey = columns
            .iter()
            .map(|(_, cells)| CellKey::from(&cells[row]))
            .collect();
        let incomplete = key.contains(&CellKey::Missing);
        if !seen.insert(key) {
            report.duplicate_rows += 1;
            keep.push(false);
        } else if incomplete {
            report.incomplete_rows += 1;
            keep.push(false);
        } else {
            keep.push(true);
        }
    }

    let data = if report.removed_rows() == 0 {
        df.clone()
    } else {
        let mask = BooleanChunked::from_slice("clean".into(), &keep);
        df.filter(&mask)
            .map_err(|source| CleanError::Filter { source })?
    };
    report.output_rows = data.height();

    debug!(
        duplicate_rows = report.duplicate_rows,
        incomplete_rows = report.incomplete_rows,
        "rows removed"
    );
    info!(
        input_rows = report.input_rows,
        output_rows = report.output_rows,
        duration_ms = start.elapsed().as_millis(),
        "clean complete"
    );
    Ok(CleanedDataset { data, report })
}

/// Cleans a dataset, falling back to the original when cleaning fails.
///
/// The returned frame is the cleaned one on success and `df` untouched on
/// failure; the outcome carries the report or the error for the caller.
pub fn clean_or_original(df: DataFrame) -> (DataFrame, Result<CleanReport>) {
    match clean_dataset(&df) {
        Ok(CleanedDataset { data, report }) => (data, Ok(report)),
        Err(error) => {
            warn!(%error, "clean failed, keeping original dataset");
            (df, Err(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use xlmerge_model::frame_from_cells;

    use super::*;

    fn sample() -> DataFrame {
        frame_from_cells(&[
            (
                "id".to_string(),
                vec![
                    CellValue::Int(1),
                    CellValue::Int(1),
                    CellValue::Int(2),
                    CellValue::Int(3),
                ],
            ),
            (
                "name".to_string(),
                vec![
                    CellValue::text("a"),
                    CellValue::text("a"),
                    CellValue::Empty,
                    CellValue::text("c"),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_report_counts() {
        let cleaned = clean_dataset(&sample()).unwrap();
        assert_eq!(
            cleaned.report,
            CleanReport {
                input_rows: 4,
                duplicate_rows: 1,
                incomplete_rows: 1,
                output_rows: 2,
            }
        );
        assert_eq!(cleaned.report.removed_rows(), 2);
    }

    #[test]
    fn test_empty_dataset() {
        let cleaned = clean_dataset(&DataFrame::empty()).unwrap();
        assert_eq!(cleaned.report.output_rows, 0);
        assert_eq!(cleaned.data.width(), 0);
    }

    #[test]
    fn test_clean_or_original_success() {
        let (data, outcome) = clean_or_original(sample());
        assert_eq!(data.height(), 2);
        assert_eq!(outcome.unwrap().duplicate_rows, 1);
    }
}
