use std::collections::HashMap;

use plotters::chart::ChartBuilder;
use plotters::element::Circle;
use plotters::style::Color;
use polars::prelude::{Column, DataFrame};

use xlmerge_model::{CellValue, SemanticType, column_cells, date_to_days, days_to_date, format_numeric};

use crate::error::{ChartError, Result};
use crate::kind::ChartKind;
use crate::render::{ChartSize, draw_svg, value_range};
use crate::style::{caption_font, series_color, title_font};

/// How a column maps onto a plot axis.
#[derive(Debug, Clone, PartialEq)]
enum Scale {
    Numeric,
    /// Days since 1970-01-01.
    Days,
    /// Category position in order of first appearance.
    Categories(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
struct Axis {
    name: String,
    scale: Scale,
    positions: Vec<Option<f64>>,
}

impl Axis {
    fn from_column(column: &Column) -> Self {
        let cells = column_cells(column);
        let name = column.name().to_string();
        match SemanticType::infer(&cells) {
            SemanticType::Integer | SemanticType::Float => Self {
                name,
                scale: Scale::Numeric,
                positions: cells.iter().map(CellValue::as_f64).collect(),
            },
            SemanticType::Date => Self {
                name,
                scale: Scale::Days,
                positions: cells
                    .iter()
                    .map(|cell| {
                        cell.as_datetime()
                            .map(|dt| f64::from(date_to_days(dt.date())))
                    })
                    .collect(),
            },
            SemanticType::Text => {
                let mut categories: Vec<String> = Vec::new();
                let mut index: HashMap<String, usize> = HashMap::new();
                let positions = cells
                    .iter()
                    .map(|cell| {
                        if cell.is_missing() {
                            return None;
                        }
                        let label = cell.to_string();
                        let pos = *index.entry(label.clone()).or_insert_with(|| {
                            categories.push(label);
                            categories.len() - 1
                        });
                        Some(pos as f64)
                    })
                    .collect();
                Self {
                    name,
                    scale: Scale::Categories(categories),
                    positions,
                }
            }
        }
    }

    fn tick_label(&self, value: f64) -> String {
        match &self.scale {
            Scale::Numeric => format_numeric(value),
            Scale::Days => days_to_date(value.round() as i32)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            Scale::Categories(labels) => {
                let idx = value.round();
                if (value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            }
        }
    }
}

/// First column against the second.
pub(crate) fn render(df: &DataFrame, size: ChartSize) -> Result<String> {
    let kind = ChartKind::Scatter;
    let columns = df.get_columns();
    if columns.len() < 2 {
        return Err(ChartError::InsufficientColumns {
            kind,
            required: 2,
            found: columns.len(),
        });
    }
    let x = Axis::from_column(&columns[0]);
    let y = Axis::from_column(&columns[1]);
    let points: Vec<(f64, f64)> = x
        .positions
        .iter()
        .zip(&y.positions)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    let (x_lo, x_hi) = value_range(points.iter().map(|(x, _)| *x));
    let (y_lo, y_hi) = value_range(points.iter().map(|(_, y)| *y));

    draw_svg(kind, size.dimensions(), |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(kind.title(), title_font())
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(80)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;
        chart
            .configure_mesh()
            .x_desc(x.name.as_str())
            .y_desc(y.name.as_str())
            .x_label_formatter(&|v| x.tick_label(*v))
            .y_label_formatter(&|v| y.tick_label(*v))
            .axis_desc_style(caption_font())
            .draw()?;

        let color = series_color(0);
        chart.draw_series(
            points
                .iter()
                .map(|point| Circle::new(*point, 4, color.filled())),
        )?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use xlmerge_model::column_from_cells;

    use super::*;

    #[test]
    fn test_text_becomes_categories() {
        let column = column_from_cells(
            "city",
            &[
                CellValue::text("Oslo"),
                CellValue::text("Lima"),
                CellValue::Empty,
                CellValue::text("Oslo"),
            ],
        )
        .unwrap();
        let axis = Axis::from_column(&column);
        assert_eq!(axis.positions, vec![Some(0.0), Some(1.0), None, Some(0.0)]);
        assert_eq!(axis.tick_label(1.0), "Lima");
        assert_eq!(axis.tick_label(0.5), "");
    }

    #[test]
    fn test_dates_become_days() {
        let day = NaiveDate::from_ymd_opt(1970, 1, 11).unwrap();
        let column = column_from_cells("day", &[CellValue::Date(day)]).unwrap();
        let axis = Axis::from_column(&column);
        assert_eq!(axis.scale, Scale::Days);
        assert_eq!(axis.positions, vec![Some(10.0)]);
        assert_eq!(axis.tick_label(10.0), "1970-01-11");
    }
}
