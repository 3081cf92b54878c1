//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use xlmerge_chart::{ChartKind, MIN_CHART_SIDE};

#[derive(Parser)]
#[command(
    name = "xlmerge",
    version,
    about = "Merge, clean, upload and chart a folder of Excel spreadsheets",
    long_about = "Merge every .xlsx file in a folder, remove duplicate and incomplete rows,\n\
                  save the result to a new spreadsheet and a SQLite table, and render charts\n\
                  from the cleaned file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: settings.toml in the platform config folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Describe the project and its pipeline steps.
    About,

    /// Merge a folder of spreadsheets, clean it, save it and upload it.
    Clean(CleanArgs),

    /// Render charts from a cleaned spreadsheet.
    Chart(ChartArgs),

    /// Summarize the end results.
    Conclusion,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Folder containing the .xlsx files to merge.
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,

    /// Where to save the cleaned spreadsheet.
    #[arg(short = 'o', long = "output", value_name = "XLSX")]
    pub output: PathBuf,

    /// Destination database table (replaced on every run).
    #[arg(short = 't', long = "table", value_name = "NAME")]
    pub table: String,

    /// SQLite database file (overrides the settings file).
    #[arg(long = "database", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Rows shown in the preview table (overrides the settings file).
    #[arg(long = "preview-rows", value_name = "N")]
    pub preview_rows: Option<usize>,
}

#[derive(Args)]
pub struct ChartArgs {
    /// Cleaned .xlsx file to plot.
    #[arg(value_name = "XLSX")]
    pub file: PathBuf,

    /// Chart to render (default: all of them).
    #[arg(short = 'k', long = "kind", value_enum, conflicts_with = "all")]
    pub kind: Option<ChartKindArg>,

    /// Render every chart.
    #[arg(long = "all")]
    pub all: bool,

    /// Output file for a single chart.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "SVG",
        requires = "kind",
        conflicts_with = "out_dir"
    )]
    pub output: Option<PathBuf>,

    /// Output folder; charts are named after their kind (default: charts).
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Chart width in pixels (overrides the settings file).
    #[arg(
        long = "width",
        value_name = "PX",
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_CHART_SIDE)..)
    )]
    pub width: Option<u32>,

    /// Chart height in pixels (overrides the settings file).
    #[arg(
        long = "height",
        value_name = "PX",
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_CHART_SIDE)..)
    )]
    pub height: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ChartKindArg {
    Line,
    Bar,
    Pie,
    Scatter,
    Histogram,
    Heatmap,
}

impl From<ChartKindArg> for ChartKind {
    fn from(arg: ChartKindArg) -> Self {
        match arg {
            ChartKindArg::Line => Self::Line,
            ChartKindArg::Bar => Self::Bar,
            ChartKindArg::Pie => Self::Pie,
            ChartKindArg::Scatter => Self::Scatter,
            ChartKindArg::Histogram => Self::Histogram,
            ChartKindArg::Heatmap => Self::Heatmap,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn chart_args(extra: &[&str]) -> Result<ChartArgs, clap::Error> {
        let mut argv = vec!["xlmerge", "chart", "cleaned.xlsx"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv)?.command {
            Command::Chart(args) => Ok(args),
            _ => panic!("expected the chart command"),
        }
    }

    #[test]
    fn chart_size_flags_parse() {
        let args = chart_args(&["--width", "800", "--height", "100"]).unwrap();
        assert_eq!(args.width, Some(800));
        assert_eq!(args.height, Some(100));
    }

    #[test]
    fn chart_size_below_minimum_is_rejected() {
        for extra in [["--width", "0"], ["--height", "0"], ["--width", "99"]] {
            let err = chart_args(&extra).err().unwrap();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "{extra:?}");
        }
    }
}
