use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use xlmerge_cli::notice::{Notice, NoticeLevel};
use xlmerge_cli::pipeline::{ChartRun, CleanRun};
use xlmerge_model::{semantic_types, value_string};

pub fn print_clean_run(run: &CleanRun, preview_rows: usize) {
    if !run.files.is_empty() {
        println!("Merged {} file(s):", run.files.len());
        for file in &run.files {
            println!("  {}", file.display());
        }
    }
    if let Some(report) = &run.report {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Input rows"),
            header_cell("Duplicates"),
            header_cell("Incomplete"),
            header_cell("Output rows"),
        ]);
        apply_table_style(&mut table);
        for idx in 0..4 {
            align_column(&mut table, idx, CellAlignment::Right);
        }
        table.add_row(vec![
            Cell::new(report.input_rows),
            count_cell(report.duplicate_rows),
            count_cell(report.incomplete_rows),
            Cell::new(report.output_rows).add_attribute(Attribute::Bold),
        ]);
        println!("{table}");
    }
    if let Some(df) = &run.cleaned {
        print_preview(df, preview_rows);
    }
    print_notices(&run.notices);
}

pub fn print_chart_run(run: &ChartRun) {
    print_notices(&run.notices);
}

fn print_preview(df: &DataFrame, rows: usize) {
    if df.width() == 0 || rows == 0 {
        return;
    }
    let mut table = Table::new();
    table.set_header(
        semantic_types(df)
            .into_iter()
            .map(|(name, semantic)| header_cell(&format!("{name}\n{semantic}"))),
    );
    apply_preview_style(&mut table);
    for column_idx in 0..df.width() {
        align_column(&mut table, column_idx, CellAlignment::Center);
    }
    let shown = rows.min(df.height());
    for row_idx in 0..shown {
        table.add_row(
            (0..df.width())
                .map(|column_idx| match value_string(df, column_idx, row_idx) {
                    value if value.is_empty() => dim_cell("-"),
                    value => Cell::new(value),
                }),
        );
    }
    println!();
    println!("Preview:");
    println!("{table}");
    if shown < df.height() {
        println!("({shown} of {} rows shown)", df.height());
    }
}

fn print_notices(notices: &[Notice]) {
    if notices.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Level"),
        header_cell("Title"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for notice in notices {
        table.add_row(vec![
            level_cell(notice.level),
            Cell::new(&notice.title).add_attribute(Attribute::Bold),
            Cell::new(&notice.message),
        ]);
    }
    println!();
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_preview_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn level_cell(level: NoticeLevel) -> Cell {
    let color = match level {
        NoticeLevel::Info => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    };
    Cell::new(level.label())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
