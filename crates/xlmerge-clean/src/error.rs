use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while cleaning a dataset.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("column {column} has {found} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("failed to filter rows: {source}")]
    Filter {
        #[source]
        source: PolarsError,
    },
}

pub type Result<T> = std::result::Result<T, CleanError>;
