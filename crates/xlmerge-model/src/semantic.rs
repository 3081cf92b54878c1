//! Semantic column types.
//!
//! The closed set of value types the pipeline understands. Inference looks at
//! the values a column actually holds, never at a storage dtype.

use std::fmt;

use crate::cell::CellValue;

/// Semantic type of a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Integer,
    Float,
    Date,
    Text,
}

impl SemanticType {
    /// Infers the semantic type of a column from its values.
    ///
    /// Missing cells are ignored. Precedence:
    /// - every value an integer: `Integer`
    /// - every value an integer or float: `Float`
    /// - every value a date or datetime: `Date`
    /// - anything else, including columns with no values: `Text`
    pub fn infer<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = &'a CellValue>,
    {
        let mut has_int = false;
        let mut has_float = false;
        let mut has_date = false;
        for cell in cells {
            if cell.is_missing() {
                continue;
            }
            match cell {
                CellValue::Int(_) => has_int = true,
                CellValue::Float(_) => has_float = true,
                CellValue::Date(_) | CellValue::DateTime(_) => has_date = true,
                CellValue::Text(_) | CellValue::Bool(_) | CellValue::Empty => return Self::Text,
            }
        }
        match (has_int, has_float, has_date) {
            (_, _, true) if has_int || has_float => Self::Text,
            (_, _, true) => Self::Date,
            (_, true, false) => Self::Float,
            (true, false, false) => Self::Integer,
            (false, false, false) => Self::Text,
        }
    }

    /// True for `Integer` and `Float`.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Date => "date",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
