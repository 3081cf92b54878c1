//! Workbook reading with calamine.
//!
//! Only the first worksheet is read. The first row of its used range is the
//! header row; every following non-blank row is a record.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use calamine::{Data, DataType, Reader, open_workbook_auto};
use chrono::NaiveTime;
use tracing::debug;

use xlmerge_model::{CellValue, whole_number};

use crate::error::{IngestError, Result};

/// Headers and rows of one worksheet, before typing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetTable {
    /// Source file.
    pub path: PathBuf,
    /// Unique column names, in sheet order.
    pub headers: Vec<String>,
    /// Records, each padded or truncated to `headers.len()`.
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Reads the first worksheet of a workbook.
pub fn read_workbook(path: &Path) -> Result<SheetTable> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::WorkbookOpen {
        path: path.to_path_buf(),
        source: e,
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|e| IngestError::WorksheetRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        debug!(path = %path.display(), "worksheet is empty");
        return Ok(SheetTable {
            path: path.to_path_buf(),
            ..SheetTable::default()
        });
    };

    let raw_headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_from_excel(cell).to_string().trim().to_string())
        .collect();
    let headers = unique_headers(raw_headers);

    let mut records = Vec::new();
    for row in rows {
        let mut record = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            record.push(row.get(idx).map_or(CellValue::Empty, cell_from_excel));
        }
        if record.iter().all(CellValue::is_missing) {
            continue;
        }
        records.push(record);
    }

    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = records.len(),
        "worksheet read"
    );
    Ok(SheetTable {
        path: path.to_path_buf(),
        headers,
        rows: records,
    })
}

/// Converts a calamine cell into a cell value.
///
/// Spreadsheets store every number as a float, so whole numbers come back as
/// integers. Error cells (`#N/A`, `#DIV/0!`, ...) are missing.
pub fn cell_from_excel(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Int(v) => CellValue::Int(*v),
        Data::Float(v) => whole_number(*v).map_or(CellValue::Float(*v), CellValue::Int),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::String(s) => CellValue::text(s.as_str()),
        Data::DateTime(dt) if dt.is_duration() => CellValue::Float(dt.as_f64()),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_datetime() {
            Some(dt) if dt.time() == NaiveTime::MIN => CellValue::Date(dt.date()),
            Some(dt) => CellValue::DateTime(dt),
            None => CellValue::text(cell.to_string()),
        },
        Data::DurationIso(s) => CellValue::text(s.as_str()),
    }
}

/// Names empty headers `Unnamed: {index}` and suffixes repeats with `.1`, `.2`, ...
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut used = HashSet::new();
    let mut headers = Vec::with_capacity(raw.len());
    for (idx, name) in raw.into_iter().enumerate() {
        let base = if name.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name
        };
        let mut candidate = base.clone();
        let mut suffix = 1usize;
        while used.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        used.insert(candidate.clone());
        headers.push(candidate);
    }
    headers
}
