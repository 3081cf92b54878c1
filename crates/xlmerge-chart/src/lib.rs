//! Chart recipes over cleaned datasets.
//!
//! Every recipe is a pure function from a dataset to an SVG document:
//!
//! - line: numeric columns against the row index
//! - bar: numeric columns as grouped bars per row
//! - pie: value frequencies of the second column
//! - scatter: first column against the second
//! - histogram: a 10-bin histogram per numeric column, laid out in a grid
//! - heatmap: pairwise Pearson correlation of the numeric columns
//!
//! Numeric means integer or float by semantic inference. Recipes fail
//! independently; rendering one never affects another.

mod error;
mod kind;
mod recipes;
mod render;
mod stats;
mod style;

// === Error Types ===
pub use error::{ChartError, Result};

// === Rendering ===
pub use kind::ChartKind;
pub use render::{ChartSize, MIN_CHART_SIDE, RenderedChart, render_chart, render_chart_sized};

// === Statistics ===
pub use stats::{Bin, correlation_matrix, histogram, pearson, value_counts};
