//! Conversions between cells and Polars columns.

use chrono::NaiveTime;
use polars::prelude::{
    Column, DataFrame, DataType, IntoColumn, IntoSeries, NamedFrom, PolarsResult, Series,
    StructChunked, TimeUnit,
};

use crate::cell::{CellValue, date_to_days};
use crate::semantic::SemanticType;

/// A numeric column extracted for plotting or statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Reads every value of a column as cells.
///
/// Mixed columns (see [`column_from_cells`]) decode back to the cell type
/// each value was stored with.
pub fn column_cells(column: &Column) -> Vec<CellValue> {
    if let Some(fields) = mixed_fields(column) {
        return (0..column.len())
            .map(|row| mixed_cell(&fields, row))
            .collect();
    }
    (0..column.len())
        .map(|row| plain_cell(column, row))
        .collect()
}

/// Reads one value of a column as a cell.
pub fn cell_at(column: &Column, row: usize) -> CellValue {
    match mixed_fields(column) {
        Some(fields) => mixed_cell(&fields, row),
        None => plain_cell(column, row),
    }
}

fn plain_cell(column: &Column, row: usize) -> CellValue {
    column
        .get(row)
        .map(CellValue::from_any)
        .unwrap_or(CellValue::Empty)
}

fn mixed_fields(column: &Column) -> Option<Vec<Series>> {
    if !matches!(column.dtype(), DataType::Struct(_)) {
        return None;
    }
    column
        .as_materialized_series()
        .struct_()
        .ok()
        .map(StructChunked::fields_as_series)
}

/// The first present field of a mixed row; at most one is set.
fn mixed_cell(fields: &[Series], row: usize) -> CellValue {
    fields
        .iter()
        .map(|field| {
            field
                .get(row)
                .map(CellValue::from_any)
                .unwrap_or(CellValue::Empty)
        })
        .find(|cell| !cell.is_missing())
        .unwrap_or(CellValue::Empty)
}

/// Infers the semantic type of a column from its values.
pub fn column_semantic_type(column: &Column) -> SemanticType {
    SemanticType::infer(&column_cells(column))
}

/// Column names paired with their inferred semantic types, in column order.
pub fn semantic_types(df: &DataFrame) -> Vec<(String, SemanticType)> {
    df.get_columns()
        .iter()
        .map(|column| (column.name().to_string(), column_semantic_type(column)))
        .collect()
}

/// Integer and float columns, in column order.
pub fn numeric_columns(df: &DataFrame) -> Vec<NumericColumn> {
    df.get_columns()
        .iter()
        .filter_map(|column| {
            let cells = column_cells(column);
            if !SemanticType::infer(&cells).is_numeric() {
                return None;
            }
            Some(NumericColumn {
                name: column.name().to_string(),
                values: cells.iter().map(CellValue::as_f64).collect(),
            })
        })
        .collect()
}

/// Builds a typed column from cells.
///
/// The dtype follows [`SemanticType::infer`]: `Int64`, `Float64`, `Date` (when
/// every value falls on midnight) or `Datetime(µs)`. Text columns are `String`
/// when every value is text and `Boolean` when every value is a boolean.
/// Any other mix is stored as a struct with one field per cell kind, so a
/// number and the text of that number stay different values.
pub fn column_from_cells(name: &str, cells: &[CellValue]) -> PolarsResult<Column> {
    let series = match SemanticType::infer(cells) {
        SemanticType::Integer => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    CellValue::Int(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        SemanticType::Float => {
            let values: Vec<Option<f64>> = cells.iter().map(CellValue::as_f64).collect();
            Series::new(name.into(), values)
        }
        SemanticType::Date => {
            let all_midnight = cells
                .iter()
                .filter_map(CellValue::as_datetime)
                .all(|dt| dt.time() == NaiveTime::MIN);
            if all_midnight {
                let values: Vec<Option<i32>> = cells
                    .iter()
                    .map(|cell| cell.as_datetime().map(|dt| date_to_days(dt.date())))
                    .collect();
                Series::new(name.into(), values).cast(&DataType::Date)?
            } else {
                let values: Vec<Option<i64>> = cells
                    .iter()
                    .map(|cell| {
                        cell.as_datetime()
                            .map(|dt| dt.and_utc().timestamp_micros())
                    })
                    .collect();
                Series::new(name.into(), values)
                    .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?
            }
        }
        SemanticType::Text => text_series(name, cells)?,
    };
    Ok(series.into_column())
}

/// Cell kinds of a mixed column, in field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Int,
    Float,
    Bool,
    Date,
    DateTime,
    Text,
}

impl CellKind {
    const ALL: [Self; 6] = [
        Self::Int,
        Self::Float,
        Self::Bool,
        Self::Date,
        Self::DateTime,
        Self::Text,
    ];

    fn of(cell: &CellValue) -> Option<Self> {
        if cell.is_missing() {
            return None;
        }
        match cell {
            CellValue::Empty => None,
            CellValue::Int(_) => Some(Self::Int),
            CellValue::Float(_) => Some(Self::Float),
            CellValue::Bool(_) => Some(Self::Bool),
            CellValue::Date(_) => Some(Self::Date),
            CellValue::DateTime(_) => Some(Self::DateTime),
            CellValue::Text(_) => Some(Self::Text),
        }
    }

    const fn field_name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Text => "text",
        }
    }

    /// Values of this kind, null in every other row.
    fn field(self, cells: &[CellValue]) -> PolarsResult<Series> {
        let name = self.field_name().into();
        let series = match self {
            Self::Int => Series::new(
                name,
                cells
                    .iter()
                    .map(|cell| match cell {
                        CellValue::Int(v) => Some(*v),
                        _ => None,
                    })
                    .collect::<Vec<_>>(),
            ),
            Self::Float => Series::new(
                name,
                cells
                    .iter()
                    .map(|cell| match cell {
                        CellValue::Float(v) if !v.is_nan() => Some(*v),
                        _ => None,
                    })
                    .collect::<Vec<_>>(),
            ),
            Self::Bool => Series::new(name, bool_values(cells)),
            Self::Date => Series::new(
                name,
                cells
                    .iter()
                    .map(|cell| match cell {
                        CellValue::Date(d) => Some(date_to_days(*d)),
                        _ => None,
                    })
                    .collect::<Vec<_>>(),
            )
            .cast(&DataType::Date)?,
            Self::DateTime => Series::new(
                name,
                cells
                    .iter()
                    .map(|cell| match cell {
                        CellValue::DateTime(dt) => Some(dt.and_utc().timestamp_micros()),
                        _ => None,
                    })
                    .collect::<Vec<_>>(),
            )
            .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?,
            Self::Text => Series::new(
                name,
                cells
                    .iter()
                    .map(|cell| match cell {
                        CellValue::Text(s) => Some(s.as_str()),
                        _ => None,
                    })
                    .collect::<Vec<_>>(),
            ),
        };
        Ok(series)
    }
}

fn bool_values(cells: &[CellValue]) -> Vec<Option<bool>> {
    cells
        .iter()
        .map(|cell| match cell {
            CellValue::Bool(v) => Some(*v),
            _ => None,
        })
        .collect()
}

fn text_series(name: &str, cells: &[CellValue]) -> PolarsResult<Series> {
    let kinds: Vec<CellKind> = CellKind::ALL
        .into_iter()
        .filter(|kind| cells.iter().any(|cell| CellKind::of(cell) == Some(*kind)))
        .collect();
    match kinds.as_slice() {
        [CellKind::Bool] => Ok(Series::new(name.into(), bool_values(cells))),
        [] | [CellKind::Text] => {
            let values: Vec<Option<&str>> = cells
                .iter()
                .map(|cell| match cell {
                    CellValue::Text(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect();
            Ok(Series::new(name.into(), values))
        }
        _ => {
            let fields = kinds
                .iter()
                .map(|kind| kind.field(cells))
                .collect::<PolarsResult<Vec<_>>>()?;
            Ok(StructChunked::from_series(name.into(), cells.len(), fields.iter())?.into_series())
        }
    }
}

/// Builds a DataFrame from named cell columns.
pub fn frame_from_cells(columns: &[(String, Vec<CellValue>)]) -> PolarsResult<DataFrame> {
    let mut built = Vec::with_capacity(columns.len());
    for (name, cells) in columns {
        built.push(column_from_cells(name, cells)?);
    }
    DataFrame::new(built)
}

/// Display string of a single value, empty for missing.
pub fn value_string(df: &DataFrame, column_idx: usize, row_idx: usize) -> String {
    df.get_columns()
        .get(column_idx)
        .filter(|column| row_idx < column.len())
        .map(|column| cell_at(column, row_idx).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn builds_typed_columns() {
        let df = frame_from_cells(&[
            ("id".to_string(), vec![CellValue::Int(1), CellValue::Int(2)]),
            (
                "price".to_string(),
                vec![CellValue::Float(1.5), CellValue::Int(2)],
            ),
            (
                "when".to_string(),
                vec![
                    CellValue::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
                    CellValue::Empty,
                ],
            ),
            (
                "name".to_string(),
                vec![CellValue::Text("a".into()), CellValue::Bool(true)],
            ),
        ])
        .unwrap();

        assert_eq!(df.column("id").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("price").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("when").unwrap().dtype(), &DataType::Date);
        assert!(matches!(
            df.column("name").unwrap().dtype(),
            DataType::Struct(_)
        ));
        assert_eq!(value_string(&df, 3, 1), "true");
        assert_eq!(value_string(&df, 3, 0), "a");
        assert_eq!(value_string(&df, 2, 1), "");
    }

    #[test]
    fn datetimes_with_time_keep_time() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap();
        let column = column_from_cells("ts", &[CellValue::DateTime(dt)]).unwrap();
        assert!(matches!(column.dtype(), DataType::Datetime(_, _)));
        assert_eq!(column_cells(&column), vec![CellValue::DateTime(dt)]);
    }

    #[test]
    fn mixed_columns_keep_cell_types() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let cells = vec![
            CellValue::Int(1),
            CellValue::text("1"),
            CellValue::Empty,
            CellValue::Bool(false),
            CellValue::Float(2.5),
            CellValue::Date(day),
        ];
        let column = column_from_cells("code", &cells).unwrap();

        assert_eq!(column.len(), 6);
        assert_eq!(column_cells(&column), cells);
        assert_eq!(cell_at(&column, 1), CellValue::text("1"));
        assert_eq!(cell_at(&column, 2), CellValue::Empty);
        assert_eq!(column_semantic_type(&column), SemanticType::Text);
    }

    #[test]
    fn boolean_columns_stay_boolean() {
        let cells = vec![CellValue::Bool(true), CellValue::Empty, CellValue::Bool(false)];
        let column = column_from_cells("flag", &cells).unwrap();
        assert_eq!(column.dtype(), &DataType::Boolean);
        assert_eq!(column_cells(&column), cells);
    }

    #[test]
    fn filtering_keeps_mixed_values() {
        let df = frame_from_cells(&[(
            "code".to_string(),
            vec![CellValue::Int(7), CellValue::text("x"), CellValue::Int(8)],
        )])
        .unwrap();
        let mask = Series::new("keep".into(), &[true, false, true]);
        let kept = df.filter(mask.bool().unwrap()).unwrap();
        assert_eq!(
            column_cells(kept.column("code").unwrap()),
            vec![CellValue::Int(7), CellValue::Int(8)]
        );
    }

    #[test]
    fn numeric_columns_skip_text() {
        let df = frame_from_cells(&[
            ("a".to_string(), vec![CellValue::Int(1), CellValue::Empty]),
            ("b".to_string(), vec![CellValue::text("x"), CellValue::text("y")]),
            (
                "c".to_string(),
                vec![CellValue::Float(0.5), CellValue::Float(1.5)],
            ),
        ])
        .unwrap();
        let numeric = numeric_columns(&df);
        assert_eq!(numeric.len(), 2);
        assert_eq!(numeric[0].name, "a");
        assert_eq!(numeric[0].values, vec![Some(1.0), None]);
        assert_eq!(numeric[1].name, "c");
    }

    #[test]
    fn semantic_types_follow_column_order() {
        let df = frame_from_cells(&[
            ("x".to_string(), vec![CellValue::Int(1)]),
            ("y".to_string(), vec![CellValue::text("t")]),
        ])
        .unwrap();
        assert_eq!(
            semantic_types(&df),
            vec![
                ("x".to_string(), SemanticType::Integer),
                ("y".to_string(), SemanticType::Text)
            ]
        );
    }
}
