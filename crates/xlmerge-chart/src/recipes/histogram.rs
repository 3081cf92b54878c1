use plotters::chart::ChartBuilder;
use plotters::element::Rectangle;
use plotters::style::Color;
use polars::prelude::DataFrame;

use xlmerge_model::numeric_columns;

use crate::error::{ChartError, Result};
use crate::kind::ChartKind;
use crate::render::{ChartSize, draw_svg};
use crate::stats::histogram;
use crate::style::{caption_font, series_color, title_font};

pub(crate) const HISTOGRAM_BINS: usize = 10;

/// `(rows, columns)` of a near-square grid holding `panels` panels.
pub(crate) fn grid_shape(panels: usize) -> (usize, usize) {
    let columns = ((panels as f64).sqrt().ceil() as usize).max(1);
    (panels.div_ceil(columns).max(1), columns)
}

/// One histogram panel per numeric column.
pub(crate) fn render(df: &DataFrame, size: ChartSize) -> Result<String> {
    let kind = ChartKind::Histogram;
    let columns = numeric_columns(df);
    if columns.is_empty() {
        return Err(ChartError::NoNumericColumns { kind });
    }
    let panels: Vec<_> = columns
        .iter()
        .map(|column| (column.name.as_str(), histogram(&column.values, HISTOGRAM_BINS)))
        .collect();
    let shape = grid_shape(panels.len());

    draw_svg(kind, size.dimensions(), |root| {
        let area = root.titled(kind.title(), title_font())?;
        let cells = area.split_evenly(shape);
        let color = series_color(0);
        for ((name, bins), cell) in panels.iter().zip(cells.iter()) {
            let lo = bins.first().map_or(0.0, |bin| bin.start);
            let hi = bins.last().map_or(1.0, |bin| bin.end);
            let max_count = bins.iter().map(|bin| bin.count).max().unwrap_or(0).max(1);

            let mut chart = ChartBuilder::on(cell)
                .caption(*name, caption_font())
                .margin(10)
                .x_label_area_size(25)
                .y_label_area_size(40)
                .build_cartesian_2d(lo..hi, 0f64..max_count as f64 * 1.1)?;
            chart.configure_mesh().x_labels(5).y_labels(5).draw()?;
            chart.draw_series(bins.iter().map(|bin| {
                Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], color.filled())
            }))?;
        }
        Ok(())
    })
}
