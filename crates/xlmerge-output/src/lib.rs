//! Spreadsheet output for cleaned datasets.

mod error;
mod xlsx;

pub use error::{Result, SaveError};
pub use xlsx::{MAX_COLUMNS, MAX_DATA_ROWS, WriteSummary, write_xlsx};
