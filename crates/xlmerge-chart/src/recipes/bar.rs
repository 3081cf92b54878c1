use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::element::Rectangle;
use plotters::style::{BLACK, Color, WHITE};
use polars::prelude::DataFrame;

use xlmerge_model::numeric_columns;

use crate::error::{ChartError, Result};
use crate::kind::ChartKind;
use crate::render::{ChartSize, draw_svg, value_range};
use crate::style::{caption_font, series_color, title_font};

/// Share of a row slot covered by its group of bars.
const GROUP_WIDTH: f64 = 0.8;

/// Numeric columns as grouped bars, one group per row.
pub(crate) fn render(df: &DataFrame, size: ChartSize) -> Result<String> {
    let kind = ChartKind::Bar;
    let columns = numeric_columns(df);
    if columns.is_empty() {
        return Err(ChartError::NoNumericColumns { kind });
    }
    let rows = df.height().max(1) as f64;
    let values = columns
        .iter()
        .flat_map(|column| column.values.iter().flatten().copied())
        .chain([0.0]);
    let (y_lo, y_hi) = value_range(values);
    let bar_width = GROUP_WIDTH / columns.len() as f64;

    draw_svg(kind, size.dimensions(), |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(kind.title(), title_font())
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..rows - 0.5, y_lo..y_hi)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("row")
            .x_label_formatter(&|x| format!("{x:.0}"))
            .axis_desc_style(caption_font())
            .draw()?;

        for (idx, column) in columns.iter().enumerate() {
            let color = series_color(idx);
            let offset = -GROUP_WIDTH / 2.0 + bar_width * idx as f64;
            let bars = column.values.iter().enumerate().filter_map(|(row, value)| {
                let v = (*value)?;
                let x0 = row as f64 + offset;
                Some(Rectangle::new([(x0, 0.0), (x0 + bar_width, v)], color.filled()))
            });
            chart
                .draw_series(bars)?
                .label(column.name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
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
