use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use colmap_model::{
    ConfidenceLevel, ConfidenceThresholds, MapColumnsResponse, MappingSuggestion, MappingSummary,
};

/// Prints the per-column table and totals to stderr, keeping stdout for JSON.
pub fn print_summary(response: &MapColumnsResponse) {
    let thresholds = ConfidenceThresholds::default();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Confidence"),
        header_cell("Level"),
        header_cell("Reasoning"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for suggestion in &response.suggestions {
        table.add_row(vec![
            Cell::new(&suggestion.original_column),
            field_cell(suggestion),
            Cell::new(format!("{:.2}", suggestion.confidence)),
            level_cell(suggestion, &thresholds),
            Cell::new(&suggestion.reasoning),
        ]);
    }
    eprintln!("{table}");

    let summary = MappingSummary::from_suggestions_with(&response.suggestions, &thresholds);
    let mean = summary
        .mean_confidence
        .map_or_else(|| "-".to_string(), |mean| format!("{mean:.2}"));
    eprintln!(
        "Mapped {}/{} columns (high {}, medium {}, low {}), mean confidence {mean}",
        summary.mapped,
        summary.total,
        summary.count(ConfidenceLevel::High),
        summary.count(ConfidenceLevel::Medium),
        summary.count(ConfidenceLevel::Low),
    );
}

fn field_cell(suggestion: &MappingSuggestion) -> Cell {
    if suggestion.is_mapped() {
        Cell::new(&suggestion.suggested_field)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(&suggestion.suggested_field)
    }
}

fn level_cell(suggestion: &MappingSuggestion, thresholds: &ConfidenceThresholds) -> Cell {
    if !suggestion.is_mapped() {
        return dim_cell("-");
    }
    match thresholds.categorize(suggestion.confidence) {
        Some(ConfidenceLevel::High) => Cell::new("high").fg(Color::Green),
        Some(ConfidenceLevel::Medium) => Cell::new("medium").fg(Color::Yellow),
        Some(ConfidenceLevel::Low) => Cell::new("low").fg(Color::Red),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
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
        .set_width(140);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ColumnConstraint::UpperBoundary(Width::Fixed(16)),
        ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ColumnConstraint::LowerBoundary(Width::Fixed(7)),
        ColumnConstraint::UpperBoundary(Width::Percentage(50)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
