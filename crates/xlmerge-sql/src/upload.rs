//! Table upload.

use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::DataFrame;
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};
use tracing::{debug, info, info_span};

use xlmerge_model::{CellValue, SemanticType, column_cells};

use crate::error::{DatabaseError, Result};
use crate::identifier::Identifier;
use crate::schema::{ColumnDef, TableSchema, VARCHAR_LEN, infer_table_schema};

/// Where the destination database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl DatabaseConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub table: String,
    pub columns: usize,
    pub rows_inserted: usize,
}

/// Replaces a database table with the contents of a dataset.
#[derive(Debug, Clone)]
pub struct TableUploader {
    config: DatabaseConfig,
}

impl TableUploader {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    pub fn database_path(&self) -> &Path {
        &self.config.path
    }

    /// Drops and recreates `table`, then inserts every row of `df`.
    ///
    /// Everything runs in one transaction: the drop, the create and one
    /// execution of a prepared insert per row, committed once at the end. Any
    /// failure rolls the transaction back and leaves the previous table in place.
    pub fn upload(&self, df: &DataFrame, table: &str) -> Result<UploadReport> {
        let span = info_span!("upload", table, rows = df.height());
        let _guard = span.enter();
        let start = Instant::now();

        let schema = infer_table_schema(table, df)?;
        let rows = row_values(&schema, df)?;

        let mut conn = self.open()?;
        let statement_err = |action| {
            let table = schema.table.to_string();
            move |source| DatabaseError::Statement {
                action,
                table,
                source,
            }
        };
        let tx = conn.transaction().map_err(statement_err("begin upload of"))?;
        tx.execute(&schema.drop_table_sql(), [])
            .map_err(statement_err("drop"))?;
        tx.execute(&schema.create_table_sql(), [])
            .map_err(statement_err("create"))?;
        debug!(columns = schema.columns.len(), "table created");

        {
            let mut insert = tx
                .prepare(&schema.insert_sql())
                .map_err(statement_err("prepare insert for"))?;
            for (row_idx, values) in rows.iter().enumerate() {
                insert
                    .execute(params_from_iter(values.iter()))
                    .map_err(|source| DatabaseError::Insert {
                        table: schema.table.to_string(),
                        row: row_idx,
                        source,
                    })?;
            }
        }

        tx.commit().map_err(|source| DatabaseError::Commit {
            table: schema.table.to_string(),
            source,
        })?;

        info!(
            rows_inserted = rows.len(),
            duration_ms = start.elapsed().as_millis(),
            "upload complete"
        );
        Ok(UploadReport {
            table: schema.table.to_string(),
            columns: schema.columns.len(),
            rows_inserted: rows.len(),
        })
    }

    /// Number of rows currently stored in `table`.
    pub fn count_rows(&self, table: &str) -> Result<u64> {
        let table = Identifier::new(table)?;
        let conn = self.open()?;
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table.quoted()), [], |row| {
                row.get(0)
            })
            .map_err(|source| DatabaseError::Statement {
                action: "count rows of",
                table: table.to_string(),
                source,
            })?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    fn open(&self) -> Result<Connection> {
        Connection::open(&self.config.path).map_err(|source| DatabaseError::Open {
            path: self.config.path.clone(),
            source,
        })
    }
}

/// Converts every row into bind parameters, validating values up front.
fn row_values(schema: &TableSchema, df: &DataFrame) -> Result<Vec<Vec<Value>>> {
    let mut rows = vec![Vec::with_capacity(schema.columns.len()); df.height()];
    for (def, column) in schema.columns.iter().zip(df.get_columns()) {
        for (row_idx, cell) in column_cells(column).iter().enumerate() {
            let value = bind_value(def, row_idx, cell)?;
            rows[row_idx].push(value);
        }
    }
    Ok(rows)
}

fn bind_value(def: &ColumnDef, row: usize, cell: &CellValue) -> Result<Value> {
    if cell.is_missing() {
        return Ok(Value::Null);
    }
    let value = match def.semantic {
        SemanticType::Integer => match cell {
            CellValue::Int(v) => Value::Integer(*v),
            other => other.as_f64().map_or(Value::Null, Value::Real),
        },
        SemanticType::Float => cell.as_f64().map_or(Value::Null, Value::Real),
        SemanticType::Date => cell.as_datetime().map_or(Value::Null, |dt| {
            Value::Text(dt.date().format("%Y-%m-%d").to_string())
        }),
        SemanticType::Text => {
            let text = cell.to_string();
            let length = text.chars().count();
            if length > VARCHAR_LEN {
                return Err(DatabaseError::ValueTooLong {
                    column: def.name.to_string(),
                    row,
                    length,
                    max: VARCHAR_LEN,
                });
            }
            Value::Text(text)
        }
    };
    Ok(value)
}
