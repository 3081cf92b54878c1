//! Row-wise merging of worksheets into one DataFrame.

use std::collections::HashMap;

use polars::prelude::DataFrame;

use xlmerge_model::{CellValue, frame_from_cells};

use crate::error::Result;
use crate::workbook::SheetTable;

/// Concatenates worksheets row-wise.
///
/// The merged column set is the union of all headers in first-appearance order.
/// Records from a sheet lacking a column get a missing value there. Column
/// dtypes are inferred over the merged values, so a column that is integer in
/// one file and text in another becomes a text column whose values keep their
/// own cell types.
pub fn merge_tables(tables: &[SheetTable]) -> Result<DataFrame> {
    let mut headers: Vec<String> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for table in tables {
        for header in &table.headers {
            if !positions.contains_key(header) {
                positions.insert(header.clone(), headers.len());
                headers.push(header.clone());
            }
        }
    }

    let total_rows: usize = tables.iter().map(SheetTable::row_count).sum();
    let mut columns: Vec<Vec<CellValue>> = vec![Vec::with_capacity(total_rows); headers.len()];
    for table in tables {
        // Source index of every merged column within this sheet.
        let mapping: Vec<Option<usize>> = headers
            .iter()
            .map(|header| table.headers.iter().position(|h| h == header))
            .collect();
        for row in &table.rows {
            for (column, source) in columns.iter_mut().zip(&mapping) {
                let cell = source
                    .and_then(|idx| row.get(idx))
                    .cloned()
                    .unwrap_or(CellValue::Empty);
                column.push(cell);
            }
        }
    }

    let named: Vec<(String, Vec<CellValue>)> = headers.into_iter().zip(columns).collect();
    Ok(frame_from_cells(&named)?)
}
