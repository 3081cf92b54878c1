//! Dataset cleaning: duplicate and incomplete row removal.

mod clean;
mod error;
mod key;

pub use clean::{CleanReport, CleanedDataset, clean_dataset, clean_or_original};
pub use error::{CleanError, Result};
