//! Error types for spreadsheet ingestion.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Why a folder or workbook could not be loaded.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("folder does not exist: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("cannot list folder {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("workbook does not exist: {path}")]
    FileNotFound { path: PathBuf },

    /// Not a zip archive, unsupported format, or a damaged workbook.
    #[error("cannot open workbook {path}: {source}")]
    WorkbookOpen {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook {path} has no worksheets")]
    NoWorksheet { path: PathBuf },

    #[error("cannot read first worksheet of {path}: {source}")]
    WorksheetRead {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// Building the typed merged frame failed.
    #[error("cannot build merged table: {0}")]
    Frame(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
