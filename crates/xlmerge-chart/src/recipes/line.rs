use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::element::PathElement;
use plotters::series::LineSeries;
use plotters::style::{BLACK, Color, WHITE};
use polars::prelude::DataFrame;

use xlmerge_model::numeric_columns;

use crate::error::{ChartError, Result};
use crate::kind::ChartKind;
use crate::render::{ChartSize, draw_svg, value_range};
use crate::style::{caption_font, series_color, title_font};

/// Every numeric column against the row index.
pub(crate) fn render(df: &DataFrame, size: ChartSize) -> Result<String> {
    let kind = ChartKind::Line;
    let columns = numeric_columns(df);
    if columns.is_empty() {
        return Err(ChartError::NoNumericColumns { kind });
    }
    let x_max = df.height().saturating_sub(1).max(1) as f64;
    let (y_lo, y_hi) =
        value_range(columns.iter().flat_map(|column| column.values.iter().flatten().copied()));

    draw_svg(kind, size.dimensions(), |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(kind.title(), title_font())
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..x_max, y_lo..y_hi)?;
        chart
            .configure_mesh()
            .x_desc("row")
            .axis_desc_style(caption_font())
            .draw()?;

        for (idx, column) in columns.iter().enumerate() {
            let color = series_color(idx);
            for (segment_idx, segment) in segments(&column.values).into_iter().enumerate() {
                let series = chart.draw_series(LineSeries::new(segment, color.stroke_width(2)))?;
                if segment_idx == 0 {
                    series.label(column.name.as_str()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                }
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
        Ok(())
    })
}

/// Runs of consecutive present values as `(row, value)` points.
fn segments(values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (row, value) in values.iter().enumerate() {
        match value {
            Some(v) => current.push((row as f64, *v)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}
