use std::path::PathBuf;

use thiserror::Error;

use crate::kind::ChartKind;

/// Errors raised while rendering or saving a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("{kind} needs at least {required} columns, dataset has {found}")]
    InsufficientColumns {
        kind: ChartKind,
        required: usize,
        found: usize,
    },

    #[error("{kind} needs at least one numeric column")]
    NoNumericColumns { kind: ChartKind },

    #[error("{kind}: column {column:?} has no values to plot")]
    NoValues { kind: ChartKind, column: String },

    #[error("chart size {width}x{height} is below the {min}px minimum", min = crate::render::MIN_CHART_SIDE)]
    CanvasTooSmall { width: u32, height: u32 },

    #[error("failed to render {kind}: {message}")]
    Render { kind: ChartKind, message: String },

    #[error("failed to write chart to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ChartError {
    pub(crate) fn render(kind: ChartKind, error: impl std::fmt::Display) -> Self {
        Self::Render {
            kind,
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
