use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mpdx_cli::inspect::{FilterReport, SavedListing};
use mpdx_model::{FieldKind, FieldTable};

pub fn print_report(report: &FilterReport) {
    println!("Page: {}", report.page);
    if report.filters.is_empty() {
        println!("No active filters.");
    } else {
        println!("{}", filter_table(report));
    }
    match report.query.as_str() {
        "" => println!("Query: (none)"),
        query => println!("Query: {query}"),
    }
}

pub fn print_saved(listing: &SavedListing) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Schema"),
        header_cell("Filters"),
        header_cell("Query"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in &listing.filters {
        let schema = if entry.saved.key.starts_with("graphql_") {
            "typed"
        } else {
            "legacy"
        };
        table.add_row(vec![
            Cell::new(&entry.saved.name).fg(Color::Blue).add_attribute(Attribute::Bold),
            dim_cell(schema),
            Cell::new(entry.report.filters.len()),
            Cell::new(&entry.report.query),
        ]);
    }
    if listing.filters.is_empty() {
        println!("No saved filters.");
    } else {
        println!("{table}");
    }
    if !listing.errors.is_empty() {
        eprintln!("Unreadable saved filters:");
        for error in &listing.errors {
            eprintln!("- {error}");
        }
    }
}

pub fn print_fields(table: FieldTable) {
    let mut output = Table::new();
    output.set_header(vec![header_cell("Field"), header_cell("Kind")]);
    apply_table_style(&mut output);
    let mut fields: Vec<_> = table.fields().iter().collect();
    fields.sort_by_key(|field| field.key);
    for field in fields {
        output.add_row(vec![Cell::new(field.key), kind_cell(field.kind)]);
    }
    println!("Page: {} ({} fields)", table.page(), table.len());
    println!("{output}");
}

fn filter_table(report: &FilterReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    for (key, value) in report.filters.iter() {
        table.add_row(vec![
            Cell::new(key.as_str()).fg(Color::Blue),
            kind_cell(key.kind()),
            Cell::new(value.display()),
        ]);
    }
    table
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

fn kind_cell(kind: FieldKind) -> Cell {
    let color = match kind {
        FieldKind::Boolean => Color::Green,
        FieldKind::DateRange | FieldKind::NumericRange => Color::Magenta,
        FieldKind::EnumSet(_) => Color::Yellow,
        FieldKind::StringArray | FieldKind::ScalarString => Color::White,
    };
    Cell::new(kind).fg(color)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
