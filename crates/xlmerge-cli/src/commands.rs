use std::path::PathBuf;

use anyhow::{Context, Result};

use xlmerge_chart::{ChartKind, ChartSize};
use xlmerge_cli::config::Settings;
use xlmerge_cli::pipeline::{ChartOutput, ChartRequest, ChartRun, CleanRun, run_charts, run_clean};
use xlmerge_cli::session::Session;
use xlmerge_cli::text::{
    ABOUT_OVERVIEW, ABOUT_STEPS, ABOUT_TITLE, CONCLUSION_POINTS, CONCLUSION_TITLE,
};
use xlmerge_sql::DatabaseConfig;

use crate::cli::{ChartArgs, CleanArgs};
use crate::summary::{print_chart_run, print_clean_run};

const DEFAULT_CHART_DIR: &str = "charts";

pub fn run_about() {
    println!("{ABOUT_TITLE}");
    println!();
    println!("{ABOUT_OVERVIEW}");
    println!();
    println!("Steps:");
    for (idx, (title, description)) in ABOUT_STEPS.iter().enumerate() {
        println!("{}. {title}", idx + 1);
        println!("   {description}");
    }
}

pub fn run_conclusion() {
    println!("{CONCLUSION_TITLE}");
    println!();
    for point in CONCLUSION_POINTS {
        println!("\u{2022} {point}");
    }
}

pub fn run_clean_command(args: &CleanArgs, settings: &Settings) -> Result<CleanRun> {
    let session = Session {
        folder: args.folder.clone(),
        cleaned_path: args.output.clone(),
        table_name: args.table.clone(),
        database: DatabaseConfig::new(
            args.database
                .clone()
                .unwrap_or_else(|| settings.database.path.clone()),
        ),
    };
    ensure_database_dir(&session.database)?;
    let run = run_clean(&session);
    let preview_rows = args.preview_rows.unwrap_or(settings.preview.rows);
    print_clean_run(&run, preview_rows);
    Ok(run)
}

pub fn run_chart_command(args: &ChartArgs, settings: &Settings) -> Result<ChartRun> {
    let kinds = match args.kind {
        Some(kind) if !args.all => vec![ChartKind::from(kind)],
        _ => ChartKind::ALL.to_vec(),
    };
    let output = match (&args.output, &args.out_dir) {
        (Some(path), _) => ChartOutput::File(path.clone()),
        (None, Some(dir)) => ChartOutput::Directory(dir.clone()),
        (None, None) => ChartOutput::Directory(PathBuf::from(DEFAULT_CHART_DIR)),
    };
    let defaults = settings.charts.size();
    let request = ChartRequest {
        file: args.file.clone(),
        kinds,
        output,
        size: ChartSize {
            width: args.width.unwrap_or(defaults.width),
            height: args.height.unwrap_or(defaults.height),
        },
    };
    let run = run_charts(&request);
    print_chart_run(&run);
    Ok(run)
}

/// The default database lives in the platform data folder, which may not exist yet.
fn ensure_database_dir(database: &DatabaseConfig) -> Result<()> {
    if let Some(parent) = database.path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create database folder {}", parent.display()))?;
    }
    Ok(())
}
