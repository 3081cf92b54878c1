//! Hashable row identity.

use chrono::{NaiveDate, NaiveDateTime};

use xlmerge_model::CellValue;

/// Hashable image of a cell. NaN and empty cells compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum CellKey {
    Missing,
    Int(i64),
    Float(u64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
}

impl From<&CellValue> for CellKey {
    fn from(cell: &CellValue) -> Self {
        if cell.is_missing() {
            return Self::Missing;
        }
        match cell {
            CellValue::Empty => Self::Missing,
            CellValue::Int(v) => Self::Int(*v),
            // -0.0 and 0.0 are the same value
            CellValue::Float(v) if *v == 0.0 => Self::Float(0.0f64.to_bits()),
            CellValue::Float(v) => Self::Float(v.to_bits()),
            CellValue::Bool(v) => Self::Bool(*v),
            CellValue::Date(d) => Self::Date(*d),
            CellValue::DateTime(dt) => Self::DateTime(*dt),
            CellValue::Text(s) => Self::Text(s.clone()),
        }
    }
}

pub(crate) type RowKey = Vec<CellKey>;
