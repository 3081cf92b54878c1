//! Relational upload of cleaned datasets.
//!
//! The destination is a SQLite database. Each upload derives a [`TableSchema`]
//! from the dataset's semantic column types, replaces the destination table
//! and inserts every row through a prepared, parameterized statement.

mod error;
mod identifier;
mod schema;
mod upload;

// === Error Types ===
pub use error::{DatabaseError, Result};

// === Schema ===
pub use identifier::{Identifier, MAX_IDENTIFIER_LEN};
pub use schema::{ColumnDef, SqlType, TableSchema, VARCHAR_LEN, infer_table_schema};

// === Upload ===
pub use upload::{DatabaseConfig, TableUploader, UploadReport};
