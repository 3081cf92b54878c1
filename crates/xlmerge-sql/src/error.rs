use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while uploading a dataset to the database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("failed to open database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("invalid identifier {name:?}: {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },

    #[error("column {name:?} appears more than once (names are case-insensitive)")]
    DuplicateColumn { name: String },

    #[error("dataset has no columns to create table {table:?} from")]
    NoColumns { table: String },

    #[error(
        "value in column {column:?} at row {row} is {length} characters; the limit is {max}"
    )]
    ValueTooLong {
        column: String,
        row: usize,
        length: usize,
        max: usize,
    },

    #[error("failed to {action} table {table:?}: {source}")]
    Statement {
        action: &'static str,
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to insert row {row} into {table:?}: {source}")]
    Insert {
        table: String,
        row: usize,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to commit upload to {table:?}: {source}")]
    Commit {
        table: String,
        #[source]
        source: rusqlite::Error,
    },
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
