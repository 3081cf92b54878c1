use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Errors raised while saving a dataset to a spreadsheet.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("dataset has {rows} rows; a worksheet holds at most {max} data rows")]
    TooManyRows { rows: usize, max: usize },

    #[error("dataset has {columns} columns; a worksheet holds at most {max}")]
    TooManyColumns { columns: usize, max: usize },

    #[error("failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },
}

pub type Result<T> = std::result::Result<T, SaveError>;
