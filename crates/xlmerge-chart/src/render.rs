//! Chart rendering entry points.

use std::fs;
use std::path::Path;

use plotters::backend::SVGBackend;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind, IntoDrawingArea};
use plotters::style::WHITE;
use polars::prelude::DataFrame;
use tracing::{debug, info_span};

use crate::error::{ChartError, Result};
use crate::kind::ChartKind;
use crate::recipes;

pub(crate) type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;
pub(crate) type DrawResult = std::result::Result<(), DrawingAreaErrorKind<std::io::Error>>;

/// Smallest width or height a chart is drawn at.
pub const MIN_CHART_SIDE: u32 = 100;

/// Pixel size of a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

impl ChartSize {
    pub(crate) fn dimensions(self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Largest square that fits.
    pub(crate) fn square(self) -> (u32, u32) {
        let side = self.width.min(self.height);
        (side, side)
    }
}

/// A rendered SVG document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    pub kind: ChartKind,
    pub svg: String,
}

impl RenderedChart {
    /// Writes the SVG to `path`, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let write_err = |source| ChartError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, &self.svg).map_err(write_err)
    }
}

/// Renders one chart recipe at the default size.
pub fn render_chart(kind: ChartKind, df: &DataFrame) -> Result<RenderedChart> {
    render_chart_sized(kind, df, ChartSize::default())
}

/// Renders one chart recipe.
///
/// Recipes never modify the dataset and fail independently of each other.
pub fn render_chart_sized(kind: ChartKind, df: &DataFrame, size: ChartSize) -> Result<RenderedChart> {
    let span = info_span!("render_chart", kind = kind.slug(), rows = df.height());
    let _guard = span.enter();

    if size.width < MIN_CHART_SIDE || size.height < MIN_CHART_SIDE {
        return Err(ChartError::CanvasTooSmall {
            width: size.width,
            height: size.height,
        });
    }
    let svg = match kind {
        ChartKind::Line => recipes::line::render(df, size),
        ChartKind::Bar => recipes::bar::render(df, size),
        ChartKind::Pie => recipes::pie::render(df, size),
        ChartKind::Scatter => recipes::scatter::render(df, size),
        ChartKind::Histogram => recipes::histogram::render(df, size),
        ChartKind::Heatmap => recipes::heatmap::render(df, size),
    }?;
    debug!(bytes = svg.len(), "chart rendered");
    Ok(RenderedChart { kind, svg })
}

/// Draws onto a white SVG canvas and returns the document.
pub(crate) fn draw_svg<F>(kind: ChartKind, dimensions: (u32, u32), draw: F) -> Result<String>
where
    F: FnOnce(&Area<'_>) -> DrawResult,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, dimensions).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::render(kind, e))?;
        draw(&root).map_err(|e| ChartError::render(kind, e))?;
        root.present().map_err(|e| ChartError::render(kind, e))?;
    }
    Ok(svg)
}

/// Axis bounds covering `values` with a 5% margin.
pub(crate) fn value_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return (0.0, 1.0);
    }
    if lo == hi {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range() {
        assert_eq!(value_range([]), (0.0, 1.0));
        assert_eq!(value_range([2.0, 2.0]), (1.0, 3.0));
        let (lo, hi) = value_range([0.0, 10.0, f64::NAN]);
        assert!((lo + 0.5).abs() < 1e-12);
        assert!((hi - 10.5).abs() < 1e-12);
    }
}
