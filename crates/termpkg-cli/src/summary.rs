use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use termpkg_cli::types::{ConvertResult, ResourceTally};
use termpkg_model::ResourceKind;

pub fn print_summary(result: &ConvertResult) {
    println!("Input: {}", result.input.display());
    println!("Local system: {}", result.local_uri);
    println!("Addressing: {}", result.addressing);
    println!("{}", summary_table(&result.tallies));
}

/// Follow-up lines: where the archive went and how to load it.
pub fn print_outcome(result: &ConvertResult) {
    match &result.archive {
        Some(report) => {
            let path = report.path.display();
            println!("FHIR package saved to {path}");
            println!(
                "Load in Snowstorm with curl --form file=@{path} --form resourceUrls=\"*\" {}",
                result.loader_url
            );
        }
        None => println!(
            "Dry run: {} resources checked, {} not written",
            result.resource_count(),
            result.output.display()
        ),
    }
}

fn summary_table(tallies: &[ResourceTally]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Resource"),
        header_cell("Count"),
        header_cell("Entries"),
        header_cell("Empty"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_resources = 0usize;
    let mut total_entries = 0usize;
    let mut total_empty = 0usize;
    for tally in tallies {
        total_resources += tally.resources;
        total_entries += tally.entries;
        total_empty += tally.empty;
        table.add_row(vec![
            kind_cell(tally.kind),
            Cell::new(tally.resources),
            entries_cell(tally),
            empty_cell(tally.empty),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_resources).add_attribute(Attribute::Bold),
        Cell::new(total_entries).add_attribute(Attribute::Bold),
        empty_cell(total_empty).add_attribute(Attribute::Bold),
    ]);
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
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

fn kind_cell(kind: ResourceKind) -> Cell {
    Cell::new(kind)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

/// Mapping tables count mapped elements, catalogs count concepts.
fn entries_cell(tally: &ResourceTally) -> Cell {
    let label = match tally.kind {
        ResourceKind::ConceptMap => "elements",
        ResourceKind::CodeSystem | ResourceKind::ValueSet => "concepts",
    };
    if tally.entries == 0 {
        dim_cell(format!("0 {label}"))
    } else {
        Cell::new(format!("{} {label}", tally.entries))
    }
}

fn empty_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
