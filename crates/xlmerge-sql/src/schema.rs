//! Relational schema inference.

use std::collections::HashSet;
use std::fmt;

use polars::prelude::DataFrame;

use xlmerge_model::{SemanticType, semantic_types};

use crate::error::{DatabaseError, Result};
use crate::identifier::Identifier;

/// Maximum length of text values.
pub const VARCHAR_LEN: usize = 255;

/// Column type in the destination table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    DoublePrecision,
    Date,
    Varchar(usize),
}

impl SqlType {
    pub const fn from_semantic(semantic: SemanticType) -> Self {
        match semantic {
            SemanticType::Integer => Self::Integer,
            SemanticType::Float => Self::DoublePrecision,
            SemanticType::Date => Self::Date,
            SemanticType::Text => Self::Varchar(VARCHAR_LEN),
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("INTEGER"),
            Self::DoublePrecision => f.write_str("DOUBLE PRECISION"),
            Self::Date => f.write_str("DATE"),
            Self::Varchar(len) => write!(f, "VARCHAR({len})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: Identifier,
    pub semantic: SemanticType,
    pub sql_type: SqlType,
}

/// Destination table layout, in dataset column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table: Identifier,
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    pub fn drop_table_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", self.table.quoted())
    }

    pub fn create_table_sql(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|column| format!("    {} {}", column.name.quoted(), column.sql_type))
            .collect();
        format!(
            "CREATE TABLE {} (\n{}\n)",
            self.table.quoted(),
            columns.join(",\n")
        )
    }

    /// Parameterized insert with one `?N` placeholder per column.
    pub fn insert_sql(&self) -> String {
        let names: Vec<String> = self
            .columns
            .iter()
            .map(|column| column.name.quoted())
            .collect();
        let placeholders: Vec<String> = (1..=self.columns.len()).map(|n| format!("?{n}")).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table.quoted(),
            names.join(", "),
            placeholders.join(", ")
        )
    }
}

/// Derives the destination table layout from a dataset's column types.
pub fn infer_table_schema(table: &str, df: &DataFrame) -> Result<TableSchema> {
    let table = Identifier::new(table)?;
    if df.width() == 0 {
        return Err(DatabaseError::NoColumns {
            table: table.to_string(),
        });
    }

    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(df.width());
    for (name, semantic) in semantic_types(df) {
        if !seen.insert(name.to_lowercase()) {
            return Err(DatabaseError::DuplicateColumn { name });
        }
        columns.push(ColumnDef {
            name: Identifier::new(&name)?,
            semantic,
            sql_type: SqlType::from_semantic(semantic),
        });
    }
    Ok(TableSchema { table, columns })
}
