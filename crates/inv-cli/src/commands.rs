use std::io;

use anyhow::{Context, Result, bail};
use inv_normalization::RowNormalizer;
use inv_store::{DashboardFilter, ListFilter, Store, StoreError, WriteMode};

use inv_cli::config::Settings;
use inv_cli::edits::{create_movement, update_movement};
use inv_cli::pipeline::{IngestOutcome, ingest_file, normalize_source, write_records_csv};
use inv_cli::summary::{
    dashboard_tables, ingest_table, keywords_table, record_table, records_table, runs_table,
};

use crate::cli::{CreateArgs, DashboardArgs, IngestArgs, ListArgs, UpdateArgs};

pub fn run_ingest(store: &mut Store, settings: &Settings, args: &IngestArgs) -> Result<()> {
    let mode = if args.append {
        WriteMode::Append
    } else {
        WriteMode::Replace
    };
    let normalizer = RowNormalizer::new(settings.normalization.clone());
    let outcome = ingest_file(store, &args.file, &normalizer, mode)?;
    print_ingest(&outcome);
    Ok(())
}

pub fn print_ingest(outcome: &IngestOutcome) {
    println!("{}", ingest_table(outcome));
    if !outcome.duplicate_ids.is_empty() {
        println!("Duplicate ids: {}", outcome.duplicate_ids.join(", "));
    }
}

pub fn run_normalize(settings: &Settings, file: &std::path::Path) -> Result<()> {
    let normalizer = RowNormalizer::new(settings.normalization.clone());
    let batch = normalize_source(file, &normalizer)?;
    write_records_csv(&batch.records, io::stdout().lock())
}

pub fn run_list(store: &Store, args: &ListArgs) -> Result<()> {
    let filter = ListFilter {
        category: args.category.clone(),
        movement_type: args.movement_type.clone(),
    };
    let records = store.list(&filter).context("list movements")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        println!("{}", records_table(&records));
        println!("{} movement(s)", records.len());
    }
    Ok(())
}

pub fn run_show(store: &Store, id: &str) -> Result<()> {
    let Some(record) = store.get(id).context("read movement")? else {
        return Err(not_found(id));
    };
    println!("{}", record_table(&record));
    Ok(())
}

pub fn run_create(store: &Store, settings: &Settings, args: &CreateArgs) -> Result<()> {
    let record = create_movement(store, &settings.normalization, &args.id, &args.fields)?;
    println!("{}", record_table(&record));
    Ok(())
}

pub fn run_update(store: &Store, settings: &Settings, args: &UpdateArgs) -> Result<()> {
    let record = update_movement(store, &settings.normalization, &args.id, &args.fields)?;
    println!("{}", record_table(&record));
    Ok(())
}

pub fn run_delete(store: &Store, id: &str) -> Result<()> {
    store.delete(id)?;
    println!("Deleted {id}");
    Ok(())
}

pub fn run_dashboard(store: &Store, args: &DashboardArgs) -> Result<()> {
    check_date_range(args)?;
    let filter = DashboardFilter {
        from: args.from.clone(),
        to: args.to.clone(),
        category: args.category.clone(),
        seller: args.seller.clone(),
    };
    let dashboard = store.dashboard(&filter).context("compute dashboard")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }
    for table in dashboard_tables(&dashboard) {
        println!("{table}");
    }
    Ok(())
}

pub fn run_keywords() {
    println!("{}", keywords_table());
}

pub fn run_history(store: &Store) -> Result<()> {
    let runs = store.ingest_runs().context("read ingest history")?;
    if runs.is_empty() {
        println!("No ingest runs recorded.");
        return Ok(());
    }
    println!("{}", runs_table(&runs));
    Ok(())
}

fn not_found(id: &str) -> anyhow::Error {
    StoreError::NotFound(id.to_string()).into()
}

/// Reject an inverted date range before touching the store.
fn check_date_range(args: &DashboardArgs) -> Result<()> {
    if let (Some(from), Some(to)) = (&args.from, &args.to)
        && !from.is_empty()
        && !to.is_empty()
        && from > to
    {
        bail!("--from {from} is after --to {to}");
    }
    Ok(())
}
