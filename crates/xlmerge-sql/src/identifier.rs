//! SQL identifier validation and quoting.
//!
//! Table and column names come from user input and spreadsheet headers. They
//! are never spliced into SQL as-is: each one is validated and then emitted as
//! a double-quoted identifier with embedded quotes doubled.

use std::fmt;

use crate::error::{DatabaseError, Result};

/// Longest accepted identifier, in characters.
pub const MAX_IDENTIFIER_LEN: usize = 128;

/// A validated table or column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: &str) -> Result<Self> {
        let invalid = |reason| DatabaseError::InvalidIdentifier {
            name: name.to_string(),
            reason,
        };
        if name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if name.contains('\0') {
            return Err(invalid("name contains a NUL character"));
        }
        if name.chars().count() > MAX_IDENTIFIER_LEN {
            return Err(invalid("name is longer than 128 characters"));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier as a double-quoted SQL token.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0.replace('"', "\"\""))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
