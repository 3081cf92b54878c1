use plotters::element::{Rectangle, Text};
use plotters::style::Color;
use plotters::style::text_anchor::{HPos, VPos};
use polars::prelude::DataFrame;

use xlmerge_model::numeric_columns;

use crate::error::{ChartError, Result};
use crate::kind::ChartKind;
use crate::render::{ChartSize, draw_svg};
use crate::stats::correlation_matrix;
use crate::style::{anchored, centered, coolwarm, label_font, title_font};

const LEFT_MARGIN: i32 = 160;
const TOP_MARGIN: i32 = 20;
const BOTTOM_MARGIN: i32 = 60;
const SCALE_WIDTH: i32 = 110;
const SCALE_STEPS: i32 = 40;

/// Annotation for a correlation cell.
pub(crate) fn annotation(value: Option<f64>) -> String {
    value.map_or_else(|| "nan".to_string(), |v| format!("{v:.2}"))
}

/// Pairwise correlation of the numeric columns as an annotated color grid.
pub(crate) fn render(df: &DataFrame, size: ChartSize) -> Result<String> {
    let kind = ChartKind::Heatmap;
    let columns = numeric_columns(df);
    if columns.is_empty() {
        return Err(ChartError::NoNumericColumns { kind });
    }
    let names: Vec<&str> = columns.iter().map(|column| column.name.as_str()).collect();
    let matrix = correlation_matrix(&columns);

    draw_svg(kind, size.dimensions(), |root| {
        let area = root.titled(kind.title(), title_font())?;
        let (width, height) = area.dim_in_pixel();
        let n = names.len() as i32;
        let cell = ((width as i32 - LEFT_MARGIN - SCALE_WIDTH) / n)
            .min((height as i32 - TOP_MARGIN - BOTTOM_MARGIN) / n)
            .max(1);
        let grid_bottom = TOP_MARGIN + n * cell;

        for (i, row) in matrix.iter().enumerate() {
            let y0 = TOP_MARGIN + i as i32 * cell;
            for (j, value) in row.iter().enumerate() {
                let x0 = LEFT_MARGIN + j as i32 * cell;
                area.draw(&Rectangle::new(
                    [(x0, y0), (x0 + cell, y0 + cell)],
                    coolwarm(*value).filled(),
                ))?;
                area.draw(&Text::new(
                    annotation(*value),
                    (x0 + cell / 2, y0 + cell / 2),
                    centered(label_font()),
                ))?;
            }
            area.draw(&Text::new(
                names[i].to_string(),
                (LEFT_MARGIN - 8, y0 + cell / 2),
                anchored(label_font(), HPos::Right, VPos::Center),
            ))?;
        }
        for (j, name) in names.iter().enumerate() {
            area.draw(&Text::new(
                (*name).to_string(),
                (LEFT_MARGIN + j as i32 * cell + cell / 2, grid_bottom + 8),
                anchored(label_font(), HPos::Center, VPos::Top),
            ))?;
        }

        // Color scale from +1 at the top to -1 at the bottom.
        let scale_x = LEFT_MARGIN + n * cell + 30;
        let step = (n * cell / SCALE_STEPS).max(1);
        for s in 0..SCALE_STEPS {
            let value = 1.0 - 2.0 * f64::from(s) / f64::from(SCALE_STEPS - 1);
            let y0 = TOP_MARGIN + s * step;
            area.draw(&Rectangle::new(
                [(scale_x, y0), (scale_x + 20, y0 + step)],
                coolwarm(Some(value)).filled(),
            ))?;
        }
        let scale_bottom = TOP_MARGIN + SCALE_STEPS * step;
        for (value, y) in [
            (1.0, TOP_MARGIN),
            (0.0, (TOP_MARGIN + scale_bottom) / 2),
            (-1.0, scale_bottom),
        ] {
            area.draw(&Text::new(
                annotation(Some(value)),
                (scale_x + 26, y),
                anchored(label_font(), HPos::Left, VPos::Center),
            ))?;
        }
        Ok(())
    })
}
