use std::f64::consts::{FRAC_PI_2, TAU};

use plotters::element::{Polygon, Text};
use plotters::style::text_anchor::{HPos, VPos};
use plotters::style::{Color, WHITE};
use polars::prelude::DataFrame;

use xlmerge_model::column_cells;

use crate::error::{ChartError, Result};
use crate::kind::ChartKind;
use crate::render::{ChartSize, draw_svg};
use crate::stats::value_counts;
use crate::style::{anchored, centered, label_font, series_color, title_font};

/// Column whose value frequencies are drawn.
const PIE_COLUMN: usize = 1;

/// Frequency of each value in the second column.
pub(crate) fn render(df: &DataFrame, size: ChartSize) -> Result<String> {
    let kind = ChartKind::Pie;
    let column = df
        .get_columns()
        .get(PIE_COLUMN)
        .ok_or(ChartError::InsufficientColumns {
            kind,
            required: PIE_COLUMN + 1,
            found: df.width(),
        })?;
    let counts = value_counts(&column_cells(column));
    if counts.is_empty() {
        return Err(ChartError::NoValues {
            kind,
            column: column.name().to_string(),
        });
    }
    let total: usize = counts.iter().map(|(_, count)| count).sum();

    draw_svg(kind, size.square(), |root| {
        let area = root.titled(kind.title(), title_font())?;
        let (width, height) = area.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = f64::from(width.min(height)) * 0.35;

        let mut start = -FRAC_PI_2;
        for (idx, (label, count)) in counts.iter().enumerate() {
            let share = *count as f64 / total as f64;
            let sweep = share * TAU;
            let mid = start + sweep / 2.0;

            area.draw(&Polygon::new(
                wedge(center, radius, start, sweep),
                series_color(idx).filled(),
            ))?;
            area.draw(&Text::new(
                format!("{:.1}%", share * 100.0),
                polar(center, radius * 0.65, mid),
                centered(label_font()).color(&WHITE),
            ))?;
            let side = if mid.cos() >= 0.0 { HPos::Left } else { HPos::Right };
            area.draw(&Text::new(
                label.clone(),
                polar(center, radius * 1.08, mid),
                anchored(label_font(), side, VPos::Center),
            ))?;
            start += sweep;
        }
        Ok(())
    })
}

fn polar(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 + (radius * angle.sin()).round() as i32,
    )
}

/// Outline of a wedge, one vertex per degree of arc.
fn wedge(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = (sweep.to_degrees().round() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = start + sweep * step as f64 / steps as f64;
        points.push(polar(center, radius, angle));
    }
    points
}
