//! Table rendering for command output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use inv_model::{Field, InventoryRecord};
use inv_normalization::PRODUCT_KEYWORDS;
use inv_store::{Dashboard, IngestRun};

use crate::pipeline::IngestOutcome;

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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

pub fn ingest_table(outcome: &IngestOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Ingest"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let ignored = if outcome.ignored_columns.is_empty() {
        "-".to_string()
    } else {
        outcome.ignored_columns.join(", ")
    };
    table.add_row(vec![Cell::new("Source"), Cell::new(outcome.source.display())]);
    table.add_row(vec![Cell::new("Mode"), Cell::new(outcome.mode)]);
    table.add_row(vec![Cell::new("Rows read"), Cell::new(outcome.rows_read)]);
    table.add_row(vec![
        Cell::new("Blank rows dropped"),
        dim_cell(outcome.dropped_blank_rows),
    ]);
    table.add_row(vec![
        Cell::new("Rows without id"),
        count_cell(outcome.skipped_empty_id, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Duplicate ids"),
        count_cell(outcome.duplicate_ids.len(), Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Ignored columns"), dim_cell(ignored)]);
    table.add_row(vec![
        Cell::new("Rows written")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(outcome.rows_written).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("SHA-256"), dim_cell(&outcome.sha256)]);
    table
}

pub fn records_table(records: &[InventoryRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(Field::ALL.map(|field| header_cell(field.column_name())));
    apply_table_style(&mut table);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.id).add_attribute(Attribute::Bold),
            record
                .date
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&record.product),
            category_cell(record),
            Cell::new(&record.movement_type),
            Cell::new(record.quantity),
            Cell::new(money(record.unit_price)),
            Cell::new(&record.seller),
        ]);
    }
    table
}

fn category_cell(record: &InventoryRecord) -> Cell {
    if record.category.is_sentinel() {
        Cell::new(&record.category).fg(Color::Yellow)
    } else {
        Cell::new(&record.category)
    }
}

/// Field/value view of a single record.
pub fn record_table(record: &InventoryRecord) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    let values = [
        record.id.clone(),
        record.date.clone().unwrap_or_else(|| "-".to_string()),
        record.product.clone(),
        record.category.to_string(),
        record.movement_type.clone(),
        record.quantity.to_string(),
        money(record.unit_price),
        record.seller.clone(),
    ];
    for (field, value) in Field::ALL.into_iter().zip(values) {
        table.add_row(vec![Cell::new(field.column_name()), Cell::new(value)]);
    }
    table.add_row(vec![
        dim_cell("Total"),
        dim_cell(money(record.line_total())),
    ]);
    table
}

/// KPI table followed by the three chart series.
pub fn dashboard_tables(dashboard: &Dashboard) -> Vec<Table> {
    let mut kpis = Table::new();
    kpis.set_header(vec![
        header_cell("Ingresos totales"),
        header_cell("Artículos"),
        header_cell("Transacciones"),
    ]);
    apply_summary_table_style(&mut kpis);
    kpis.add_row(vec![
        Cell::new(money(dashboard.kpis.total_revenue)).add_attribute(Attribute::Bold),
        Cell::new(dashboard.kpis.total_items),
        Cell::new(dashboard.kpis.transactions),
    ]);

    let mut sellers = Table::new();
    sellers.set_header(vec![header_cell("Vendedor"), header_cell("Ingresos")]);
    apply_table_style(&mut sellers);
    align_column(&mut sellers, 1, CellAlignment::Right);
    for row in &dashboard.revenue_by_seller {
        sellers.add_row(vec![Cell::new(&row.seller), Cell::new(money(row.total))]);
    }

    let mut categories = Table::new();
    categories.set_header(vec![header_cell("Categoría"), header_cell("Vendidos")]);
    apply_table_style(&mut categories);
    align_column(&mut categories, 1, CellAlignment::Right);
    for row in &dashboard.top_categories {
        categories.add_row(vec![Cell::new(&row.category), Cell::new(row.total)]);
    }

    let mut trend = Table::new();
    trend.set_header(vec![header_cell("Fecha"), header_cell("Ingresos")]);
    apply_table_style(&mut trend);
    align_column(&mut trend, 1, CellAlignment::Right);
    for row in &dashboard.revenue_trend {
        trend.add_row(vec![
            row.date.as_deref().map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(money(row.total)),
        ]);
    }

    vec![kpis, sellers, categories, trend]
}

pub fn keywords_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Categoría"), header_cell("Palabras clave")]);
    apply_table_style(&mut table);
    for (category, keywords) in PRODUCT_KEYWORDS {
        table.add_row(vec![
            Cell::new(category).add_attribute(Attribute::Bold),
            Cell::new(keywords.join(", ")),
        ]);
    }
    table
}

pub fn runs_table(runs: &[IngestRun]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Run"),
        header_cell("Ingested at"),
        header_cell("Source"),
        header_cell("Mode"),
        header_cell("Read"),
        header_cell("Written"),
        header_cell("Skipped"),
        header_cell("SHA-256"),
    ]);
    apply_table_style(&mut table);
    for column in 4..=6 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for run in runs {
        let short_hash: String = run.sha256.chars().take(12).collect();
        table.add_row(vec![
            Cell::new(run.id),
            Cell::new(&run.ingested_at),
            Cell::new(&run.source),
            Cell::new(&run.mode),
            Cell::new(run.rows_read),
            Cell::new(run.rows_written),
            count_cell(usize::try_from(run.rows_skipped).unwrap_or(0), Color::Yellow),
            dim_cell(short_hash),
        ]);
    }
    table
}
