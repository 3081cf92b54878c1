//! Folder loading: discover, read and merge.

use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};

use crate::discovery::list_spreadsheet_files;
use crate::error::Result;
use crate::merge::merge_tables;
use crate::workbook::read_workbook;

/// The merged dataset of a folder and the files it came from.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub data: DataFrame,
    /// Files read, in merge order.
    pub files: Vec<PathBuf>,
}

impl LoadedDataset {
    /// True when the folder held no spreadsheet files. The dataset is empty.
    pub fn no_files_found(&self) -> bool {
        self.files.is_empty()
    }
}

/// Loads every spreadsheet in `dir` and concatenates them row-wise.
///
/// An empty folder is not an error: the result is an empty dataset with
/// [`LoadedDataset::no_files_found`] set. Any unreadable file fails the whole
/// load.
pub fn load_folder(dir: &Path) -> Result<LoadedDataset> {
    let span = info_span!("load_folder", folder = %dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let files = list_spreadsheet_files(dir)?;
    if files.is_empty() {
        warn!(folder = %dir.display(), "no spreadsheet files found");
        return Ok(LoadedDataset {
            data: DataFrame::empty(),
            files,
        });
    }

    let mut tables = Vec::with_capacity(files.len());
    for path in &files {
        let table = read_workbook(path)?;
        info!(
            source_filename = %path.file_name().and_then(|n| n.to_str()).unwrap_or("unknown"),
            rows = table.row_count(),
            columns = table.headers.len(),
            "workbook loaded"
        );
        tables.push(table);
    }
    let data = merge_tables(&tables)?;

    info!(
        file_count = files.len(),
        rows = data.height(),
        columns = data.width(),
        duration_ms = start.elapsed().as_millis(),
        "load complete"
    );
    Ok(LoadedDataset { data, files })
}

/// Loads a single workbook as a typed dataset.
pub fn load_workbook(path: &Path) -> Result<DataFrame> {
    let table = read_workbook(path)?;
    merge_tables(std::slice::from_ref(&table))
}
