use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use morele_cli::pipeline::TransformRun;
use morele_ingest::CsvHeaders;
use morele_map::{FieldSource, SkipReason, SuggestionResult};
use morele_model::{MappingMode, TARGET_SCHEMA, default_for};

pub fn print_transform_summary(run: &TransformRun) {
    let report = &run.mapped.report;
    let mode = match run.config.mode {
        MappingMode::Auto => "auto",
        MappingMode::Explicit => "explicit",
    };
    println!(
        "Rows: {}  Input columns: {}  Mode: {mode}",
        report.rows,
        run.headers.len()
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Source"),
        header_cell("Value"),
        header_cell("Defaulted"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for field in &report.fields {
        let (source, value) = match &field.source {
            FieldSource::Mapped { column } => (Cell::new("mapped").fg(Color::Green), Cell::new(column)),
            FieldSource::Override { value } => {
                (Cell::new("override").fg(Color::Yellow), Cell::new(value))
            }
            FieldSource::Default { value } => (Cell::new("default"), Cell::new(value)),
            FieldSource::Empty => (dim_cell("empty"), dim_cell("-")),
        };
        let defaulted = if field.defaulted == 0 {
            dim_cell(0)
        } else {
            Cell::new(field.defaulted).fg(Color::Yellow)
        };
        table.add_row(vec![Cell::new(field.field), source, value, defaulted]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} mapped, {} override, {} empty",
            report.mapped_count(),
            report.override_count(),
            report.empty_count()
        ))
        .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(report.defaulted_cells()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    for skipped in &report.skipped {
        let reason = match skipped.reason {
            SkipReason::MissingColumn => "no such column in input",
            SkipReason::NotText => "column cannot be read as text",
        };
        eprintln!(
            "warning: {} -> {:?} skipped: {reason}",
            skipped.field, skipped.column
        );
    }
    if !report.ignored_fields.is_empty() {
        eprintln!(
            "warning: ignored keys that are not Morele fields: {}",
            report.ignored_fields.join(", ")
        );
    }
}

pub fn print_schema() {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Field"), header_cell("Default")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, field) in TARGET_SCHEMA.iter().enumerate() {
        let default = match default_for(field) {
            Some(value) => Cell::new(value).fg(Color::Yellow),
            None => dim_cell("-"),
        };
        table.add_row(vec![Cell::new(idx + 1), Cell::new(*field), default]);
    }
    println!("{table}");
}

pub fn print_suggestions(headers: &CsvHeaders, result: &SuggestionResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Column"),
        header_cell("Confidence"),
        header_cell("Match"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for suggestion in &result.suggestions {
        table.add_row(vec![
            Cell::new(suggestion.target_field),
            Cell::new(&suggestion.source_column),
            Cell::new(format!("{:.2}", suggestion.confidence)),
            Cell::new(suggestion.kind.label()),
        ]);
    }
    for field in &result.unmatched_fields {
        table.add_row(vec![Cell::new(*field), dim_cell("-"), dim_cell("-"), dim_cell("-")]);
    }
    println!("{table}");
    println!(
        "Suggested {} of {} fields from {} columns",
        result.suggestions.len(),
        TARGET_SCHEMA.len(),
        headers.len()
    );
    if !result.unmapped_columns.is_empty() {
        println!("Unused columns: {}", result.unmapped_columns.join(", "));
    }
}

/// Prints up to `rows` rows of `df` with nulls shown dimmed.
pub fn print_preview(title: &str, df: &DataFrame, rows: usize) {
    let head = df.head(Some(rows));
    let mut table = Table::new();
    table.set_header(
        head.get_column_names()
            .into_iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in 0..head.height() {
        let cells: Vec<Cell> = head
            .get_columns()
            .iter()
            .map(|column| match column.get(row) {
                Ok(value) if !value.is_null() => Cell::new(value.str_value()),
                _ => dim_cell("null"),
            })
            .collect();
        table.add_row(cells);
    }
    println!("{title} ({} of {} rows):", head.height(), df.height());
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
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
