//! Shared data model for the xlmerge pipeline.
//!
//! A tabular dataset is a Polars [`DataFrame`](polars::prelude::DataFrame).
//! This crate adds the pieces every stage agrees on:
//!
//! - [`CellValue`]: a library-independent value, used for inference, writing
//!   spreadsheets and binding SQL parameters
//! - [`SemanticType`]: the closed set of column types (integer, float, date, text)
//!   and the pure inference function over cell values
//! - frame helpers to move between cells and typed Polars columns

mod cell;
mod frame;
mod numeric;
mod semantic;

// === Values ===
pub use cell::{CellValue, date_to_days, days_to_date, unix_epoch};

// === Types ===
pub use semantic::SemanticType;

// === Frames ===
pub use frame::{
    NumericColumn, cell_at, column_cells, column_from_cells, column_semantic_type, frame_from_cells,
    numeric_columns, semantic_types, value_string,
};

// === Formatting ===
pub use numeric::{format_numeric, whole_number};
