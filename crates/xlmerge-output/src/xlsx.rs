//! Spreadsheet output.

use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::{debug, info, info_span};

use xlmerge_model::{CellValue, column_cells};

use crate::error::{Result, SaveError};

/// Data rows that fit under the header row of one worksheet.
pub const MAX_DATA_ROWS: usize = 1_048_575;

/// Columns in one worksheet.
pub const MAX_COLUMNS: usize = 16_384;

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// What was written by [`write_xlsx`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

/// Writes a dataset to a new `.xlsx` file.
///
/// The first row holds the column names and each record follows on its own
/// row; no index column is written. An existing file at `path` is replaced and
/// missing parent directories are created.
pub fn write_xlsx(df: &DataFrame, path: &Path) -> Result<WriteSummary> {
    let span = info_span!("write_xlsx", path = %path.display());
    let _guard = span.enter();

    if df.height() > MAX_DATA_ROWS {
        return Err(SaveError::TooManyRows {
            rows: df.height(),
            max: MAX_DATA_ROWS,
        });
    }
    if df.width() > MAX_COLUMNS {
        return Err(SaveError::TooManyColumns {
            columns: df.width(),
            max: MAX_COLUMNS,
        });
    }
    ensure_parent_dir(path)?;

    let write_err = |source: XlsxError| SaveError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let formats = CellFormats::new();
    for (col_idx, column) in df.get_columns().iter().enumerate() {
        // Bounded by MAX_COLUMNS above.
        let col = col_idx as u16;
        worksheet
            .write_string_with_format(0, col, column.name().as_str(), &formats.header)
            .map_err(write_err)?;
        for (row_idx, cell) in column_cells(column).iter().enumerate() {
            let row = row_idx as u32 + 1;
            write_cell(worksheet, row, col, cell, &formats).map_err(write_err)?;
        }
    }
    debug!(rows = df.height(), columns = df.width(), "worksheet filled");

    workbook.save(path).map_err(write_err)?;
    info!(rows = df.height(), columns = df.width(), "spreadsheet saved");

    Ok(WriteSummary {
        path: path.to_path_buf(),
        rows: df.height(),
        columns: df.width(),
    })
}

struct CellFormats {
    header: Format,
    date: Format,
    datetime: Format,
}

impl CellFormats {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            date: Format::new().set_num_format(DATE_FORMAT),
            datetime: Format::new().set_num_format(DATETIME_FORMAT),
        }
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    formats: &CellFormats,
) -> std::result::Result<(), XlsxError> {
    if cell.is_missing() {
        return Ok(());
    }
    match cell {
        CellValue::Empty => {}
        CellValue::Int(v) => {
            worksheet.write_number(row, col, *v as f64)?;
        }
        CellValue::Float(v) => {
            worksheet.write_number(row, col, *v)?;
        }
        CellValue::Bool(v) => {
            worksheet.write_boolean(row, col, *v)?;
        }
        CellValue::Date(d) => {
            worksheet.write_datetime_with_format(row, col, d, &formats.date)?;
        }
        CellValue::DateTime(dt) => {
            worksheet.write_datetime_with_format(row, col, dt, &formats.datetime)?;
        }
        CellValue::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| SaveError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
