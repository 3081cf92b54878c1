use std::fmt;

/// The chart recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Scatter,
    Histogram,
    Heatmap,
}

impl ChartKind {
    pub const ALL: [Self; 6] = [
        Self::Line,
        Self::Bar,
        Self::Pie,
        Self::Scatter,
        Self::Histogram,
        Self::Heatmap,
    ];

    /// Title drawn at the top of the chart.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Line => "Line Chart",
            Self::Bar => "Bar Chart",
            Self::Pie => "Pie Chart",
            Self::Scatter => "Scatter Plot",
            Self::Histogram => "Histograms",
            Self::Heatmap => "Heatmap",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
            Self::Histogram => "histogram",
            Self::Heatmap => "heatmap",
        }
    }

    /// Default file name for the rendered chart, e.g. `line.svg`.
    pub fn file_name(self) -> String {
        format!("{}.svg", self.slug())
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
