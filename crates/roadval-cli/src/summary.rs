//! Terminal rendering of run results.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use roadval_cli::pipeline::ValidationOutcome;
use roadval_model::{ErrorReport, ReportOutcome, TableSchema};

pub fn print_summary(outcome: &ValidationOutcome) {
    println!("Input: {}", outcome.input_dir.display());
    println!("Schemas: {}", outcome.schema_source);
    if !outcome.csv_reports.is_empty() || outcome.json_report.is_some() {
        println!("Reports: {}", outcome.output_dir.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Outcome"),
        header_cell("Records"),
        header_cell("Findings"),
        header_cell("Degraded rules"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut total_records = 0usize;
    for report in &outcome.result.reports {
        total_records += report.records;
        table.add_row(vec![
            Cell::new(&report.table)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            outcome_cell(report.outcome),
            Cell::new(report.records),
            count_cell(report.finding_count(), Color::Red),
            degraded_cell(report),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        count_cell(outcome.result.total_findings(), Color::Red).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");

    if !outcome.unknown_files.is_empty() {
        println!();
        println!("Ignored files:");
        for path in &outcome.unknown_files {
            println!("- {}", path.display());
        }
    }
    if outcome.result.has_failures() {
        eprintln!("Table failures:");
        for failure in &outcome.result.failures {
            eprintln!("- {failure}");
        }
    }
}

pub fn print_schemas(schemas: &[TableSchema]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Required columns"),
        header_cell("Fields"),
        header_cell("Rules"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for schema in schemas {
        let name = if schema.policy.enabled {
            Cell::new(&schema.name).fg(Color::Blue)
        } else {
            dim_cell(format!("{} (disabled)", schema.name))
        };
        let rules = schema.policy.active_rules();
        table.add_row(vec![
            name,
            Cell::new(schema.required.join(", ")),
            Cell::new(schema.fields.len()),
            if rules.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(rules.join(", "))
            },
        ]);
    }
    println!("{table}");
}

fn outcome_cell(outcome: ReportOutcome) -> Cell {
    match outcome {
        ReportOutcome::Clean => Cell::new("clean").fg(Color::Green),
        ReportOutcome::Findings => Cell::new("findings").fg(Color::Yellow),
        ReportOutcome::SchemaFailure => Cell::new("missing columns")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        ReportOutcome::Empty => Cell::new("empty").fg(Color::Yellow),
        ReportOutcome::Disabled => dim_cell("disabled"),
    }
}

fn degraded_cell(report: &ErrorReport) -> Cell {
    if report.degraded_rules.is_empty() {
        return dim_cell("-");
    }
    let names: Vec<&str> = report
        .degraded_rules
        .iter()
        .map(|rule| rule.rule.as_str())
        .collect();
    Cell::new(names.join(", ")).fg(Color::Yellow)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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
