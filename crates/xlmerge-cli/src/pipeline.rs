//! Pipeline orchestration.
//!
//! Each stage's outcome is turned into a [`Notice`]. A load failure (or an
//! empty folder) ends the run; a clean failure continues with the merged data;
//! save and upload failures are reported and do not stop each other.

use std::path::PathBuf;
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{info, info_span};

use xlmerge_chart::{ChartKind, ChartSize, render_chart_sized};
use xlmerge_clean::{CleanReport, clean_or_original};
use xlmerge_ingest::{load_folder, load_workbook};
use xlmerge_output::{WriteSummary, write_xlsx};
use xlmerge_sql::{TableUploader, UploadReport};

use crate::notice::Notice;
use crate::session::Session;

/// Outcome of a clean-and-upload run.
#[derive(Debug, Default)]
pub struct CleanRun {
    pub notices: Vec<Notice>,
    /// Files merged, in load order.
    pub files: Vec<PathBuf>,
    /// Dataset handed to the writer and uploader.
    pub cleaned: Option<DataFrame>,
    /// `None` when cleaning failed and the merged data was kept.
    pub report: Option<CleanReport>,
    pub saved: Option<WriteSummary>,
    pub uploaded: Option<UploadReport>,
}

impl CleanRun {
    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(Notice::is_error)
    }
}

/// Loads, cleans, saves and uploads according to `session`.
pub fn run_clean(session: &Session) -> CleanRun {
    let span = info_span!("clean_run", folder = %session.folder.display());
    let _guard = span.enter();
    let start = Instant::now();
    let mut run = CleanRun::default();

    let missing = session.missing_fields();
    if !missing.is_empty() {
        run.notices.push(Notice::warning(
            "Missing",
            format!("Please fill all fields ({}).", missing.join(", ")),
        ));
        return run;
    }

    let loaded = match load_folder(&session.folder) {
        Ok(loaded) => loaded,
        Err(error) => {
            run.notices
                .push(Notice::error("Load Error", format!("Error loading files: {error}")));
            return run;
        }
    };
    if loaded.no_files_found() {
        run.notices.push(Notice::warning(
            "No Files Found",
            "No Excel files found in this folder!",
        ));
        return run;
    }
    run.files = loaded.files;
    if loaded.data.height() == 0 || loaded.data.width() == 0 {
        run.notices.push(Notice::warning(
            "No Data",
            "The spreadsheets in this folder hold no data rows.",
        ));
        return run;
    }

    let (cleaned, outcome) = clean_or_original(loaded.data);
    match outcome {
        Ok(report) => {
            run.notices.push(Notice::info(
                "Cleaned",
                format!(
                    "{} of {} rows kept ({} duplicate, {} incomplete removed).",
                    report.output_rows,
                    report.input_rows,
                    report.duplicate_rows,
                    report.incomplete_rows
                ),
            ));
            run.report = Some(report);
        }
        Err(error) => run
            .notices
            .push(Notice::error("Clean Error", format!("Error cleaning data: {error}"))),
    }

    match write_xlsx(&cleaned, &session.cleaned_path) {
        Ok(summary) => {
            run.notices.push(Notice::info(
                "Saved",
                format!("Cleaned data saved to {}", summary.path.display()),
            ));
            run.saved = Some(summary);
        }
        Err(error) => run.notices.push(Notice::error("Save Error", error.to_string())),
    }

    let uploader = TableUploader::new(session.database.clone());
    match uploader.upload(&cleaned, &session.table_name) {
        Ok(report) => {
            run.notices.push(Notice::info(
                "Database",
                format!(
                    "Cleaned data inserted into table {} successfully! ({} rows)",
                    report.table, report.rows_inserted
                ),
            ));
            run.uploaded = Some(report);
        }
        Err(error) => run
            .notices
            .push(Notice::error("Database Error", error.to_string())),
    }

    info!(
        files = run.files.len(),
        rows = cleaned.height(),
        errors = run.has_errors(),
        duration_ms = start.elapsed().as_millis(),
        "clean run finished"
    );
    run.cleaned = Some(cleaned);
    run
}

/// Where rendered charts go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutput {
    /// One chart written to this exact path.
    File(PathBuf),
    /// Each chart written as `<kind>.svg` in this folder.
    Directory(PathBuf),
}

impl ChartOutput {
    pub fn path_for(&self, kind: ChartKind) -> PathBuf {
        match self {
            Self::File(path) => path.clone(),
            Self::Directory(dir) => dir.join(kind.file_name()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartRequest {
    /// Cleaned spreadsheet to plot.
    pub file: PathBuf,
    pub kinds: Vec<ChartKind>,
    pub output: ChartOutput,
    pub size: ChartSize,
}

/// Outcome of a chart run.
#[derive(Debug, Default)]
pub struct ChartRun {
    pub notices: Vec<Notice>,
    pub written: Vec<(ChartKind, PathBuf)>,
}

impl ChartRun {
    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(Notice::is_error)
    }
}

/// Loads the cleaned spreadsheet and renders each requested chart.
///
/// A failing recipe is reported and the remaining ones still run.
pub fn run_charts(request: &ChartRequest) -> ChartRun {
    let span = info_span!("chart_run", file = %request.file.display());
    let _guard = span.enter();
    let mut run = ChartRun::default();

    if request.file.as_os_str().is_empty() {
        run.notices.push(Notice::warning(
            "Missing",
            "Please select a cleaned Excel file.",
        ));
        return run;
    }
    let df = match load_workbook(&request.file) {
        Ok(df) => df,
        Err(error) => {
            run.notices
                .push(Notice::error("Load Error", format!("Error loading file: {error}")));
            return run;
        }
    };

    for &kind in &request.kinds {
        let path = request.output.path_for(kind);
        let outcome = render_chart_sized(kind, &df, request.size)
            .and_then(|chart| chart.write_to(&path));
        match outcome {
            Ok(()) => {
                run.notices.push(Notice::info(
                    kind.title(),
                    format!("Saved to {}", path.display()),
                ));
                run.written.push((kind, path));
            }
            Err(error) => run.notices.push(Notice::error("Plot Error", error.to_string())),
        }
    }
    info!(
        requested = request.kinds.len(),
        written = run.written.len(),
        "chart run finished"
    );
    run
}
