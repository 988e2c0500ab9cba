use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mapplan_model::{
    ConverterId, ConverterSignature, Diagnostic, MappingKind, PlanSet, TypeSchema,
};

/// One row per mapping across every plan in the set, root first.
pub fn plan_table(set: &PlanSet) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Plan"),
        header_cell("Property"),
        header_cell("Source"),
        header_cell("Kind"),
        header_cell("Via"),
    ]);
    apply_table_style(&mut table);
    let plans = set.root_plan().into_iter().chain(set.nested());
    for plan in plans {
        let key = plan.key().to_string();
        if plan.is_empty() {
            table.add_row(vec![
                plan_cell(&key),
                dim_cell("(no mappings)"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ]);
            continue;
        }
        for mapping in &plan.mappings {
            table.add_row(vec![
                plan_cell(&key),
                Cell::new(&mapping.destination.name),
                Cell::new(&mapping.source),
                kind_cell(&mapping.kind),
                via_cell(&mapping.kind),
            ]);
        }
    }
    table
}

pub fn diagnostic_table(diagnostics: &[Diagnostic]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Pair"),
        header_cell("Property"),
        header_cell("Effect"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for diagnostic in diagnostics {
        let effect = if diagnostic.kind.is_omission() {
            Cell::new("omitted").fg(Color::Yellow)
        } else {
            Cell::new("degraded").fg(Color::DarkYellow)
        };
        let message = diagnostic.to_string();
        let message = message
            .split_once(": ")
            .map_or(message.as_str(), |(_, tail)| tail);
        table.add_row(vec![
            Cell::new(diagnostic.pair.to_string()),
            diagnostic
                .property
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            effect,
            Cell::new(message),
        ]);
    }
    table
}

pub fn types_table<'a>(schemas: impl IntoIterator<Item = &'a TypeSchema>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Type"),
        header_cell("Properties"),
        header_cell("Readable"),
        header_cell("Writable"),
    ]);
    apply_table_style(&mut table);
    for column in 1..4 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for schema in schemas {
        let readable = schema.properties.iter().filter(|p| p.readable).count();
        let writable = schema.properties.iter().filter(|p| p.writable).count();
        table.add_row(vec![
            plan_cell(schema.id.as_str()),
            Cell::new(schema.properties.len()),
            Cell::new(readable),
            Cell::new(writable),
        ]);
    }
    table
}

pub fn converters_table<'a>(
    converters: impl IntoIterator<Item = (&'a ConverterId, &'a ConverterSignature)>,
) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Converter"),
        header_cell("Input"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    for (id, signature) in converters {
        table.add_row(vec![
            plan_cell(id.as_str()),
            Cell::new(signature.input.to_string()),
            Cell::new(signature.output.to_string()),
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

fn kind_cell(kind: &MappingKind) -> Cell {
    let label = match kind.condition() {
        Some(condition) => format!("{} when {condition}", kind.unconditional().label()),
        None => kind.label().to_string(),
    };
    let color = match kind.unconditional() {
        MappingKind::Direct => Color::Green,
        MappingKind::NumericWiden => Color::Yellow,
        MappingKind::Converter(_) => Color::Magenta,
        _ => Color::Blue,
    };
    Cell::new(label).fg(color)
}

fn via_cell(kind: &MappingKind) -> Cell {
    match kind.unconditional() {
        MappingKind::NestedObject(key) | MappingKind::CollectionOfComplex(key) => {
            Cell::new(key.to_string())
        }
        MappingKind::Converter(id) => Cell::new(id.as_str()),
        _ => dim_cell("-"),
    }
}

fn plan_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
