//! Spreadsheet ingestion for the xlmerge pipeline.
//!
//! This crate finds `.xlsx` files in a folder, reads the first worksheet of
//! each with calamine and concatenates them row-wise into a Polars DataFrame.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use xlmerge_ingest::load_folder;
//!
//! let loaded = load_folder(Path::new("data/monthly"))?;
//! if loaded.no_files_found() {
//!     println!("nothing to merge");
//! }
//! println!("{} rows from {} files", loaded.data.height(), loaded.files.len());
//! ```

mod discovery;
mod error;
mod loader;
mod merge;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{SPREADSHEET_EXTENSION, list_spreadsheet_files};

// === Workbook Reading ===
pub use workbook::{SheetTable, cell_from_excel, read_workbook};

// === Merging & Loading ===
pub use loader::{LoadedDataset, load_folder, load_workbook};
pub use merge::merge_tables;
