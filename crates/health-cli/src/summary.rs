use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use health_cli::types::{FetchSummary, PipelineReport, VerifySummary};

pub fn print_run_summary(report: &PipelineReport) {
    if !report.fetches.is_empty() {
        print_fetches(&report.fetches);
        println!();
    }
    println!("Database: {} (table {})", report.database.display(), report.table);
    println!("CSV: {}", report.csv.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Description"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Dropped"),
        header_cell("Time (ms)"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for stage in &report.stages {
        let dropped = stage.rows_in.saturating_sub(stage.rows_out);
        table.add_row(vec![
            Cell::new(stage.stage)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(stage.description),
            Cell::new(stage.rows_in),
            Cell::new(stage.rows_out),
            count_cell(dropped, Color::Yellow),
            dim_cell(stage.duration_ms),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new("Rows written to each sink")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(report.rows_written).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
}

pub fn print_fetches(fetches: &[FetchSummary]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Path"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    for fetch in fetches {
        let status = match (&fetch.bytes, &fetch.error) {
            (Some(bytes), _) => Cell::new(format!("saved {bytes} bytes")).fg(Color::Green),
            (None, Some(error)) => Cell::new(error).fg(Color::Red),
            (None, None) => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(fetch.source),
            Cell::new(fetch.path.display()),
            status,
        ]);
    }
    println!("{table}");
}

pub fn print_verification(summary: &VerifySummary) {
    println!(
        "Database: {} (table {})",
        summary.database.display(),
        summary.table
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Result"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for check in &summary.checks {
        let result = if check.passed {
            Cell::new("PASS").fg(Color::Green)
        } else {
            Cell::new("FAIL")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        };
        table.add_row(vec![Cell::new(check.name), result, Cell::new(&check.detail)]);
    }
    println!("{table}");
    if summary.passed {
        println!("Verification passed.");
    } else {
        eprintln!("Verification failed.");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
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
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
