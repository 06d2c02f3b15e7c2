//! Ingestion pipeline: read, normalize, filter, store.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use inv_ingest::{file_fingerprint, read_raw_table};
use inv_model::InventoryRecord;
use inv_normalization::RowNormalizer;
use inv_store::{NewIngestRun, Store, WriteMode};
use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::config::Settings;
use crate::logging::redact_value;

/// Normalized rows of one source file, ready to be written.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    /// One record per identifier, in order of first appearance.
    pub records: Vec<InventoryRecord>,
    /// Non-blank rows read from the source.
    pub rows_read: usize,
    pub dropped_blank_rows: usize,
    /// Rows dropped because their identifier was empty after trimming.
    pub skipped_empty_id: usize,
    /// Identifiers that occurred more than once; the last occurrence wins.
    pub duplicate_ids: Vec<String>,
    pub ignored_columns: Vec<String>,
}

/// Outcome of an ingest run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    pub source: PathBuf,
    pub sha256: String,
    pub mode: WriteMode,
    pub rows_read: usize,
    pub dropped_blank_rows: usize,
    pub skipped_empty_id: usize,
    pub duplicate_ids: Vec<String>,
    pub ignored_columns: Vec<String>,
    pub rows_written: usize,
    pub run_id: i64,
}

/// Read and normalize a source file without touching the store.
pub fn normalize_source(path: &Path, normalizer: &RowNormalizer) -> Result<NormalizedBatch> {
    let start = Instant::now();
    let table =
        read_raw_table(path).with_context(|| format!("read source {}", path.display()))?;
    let normalized = normalizer.normalize_batch(&table.records);
    info!(
        rows = normalized.len(),
        duration_ms = start.elapsed().as_millis(),
        "normalized rows"
    );

    let mut batch = NormalizedBatch {
        rows_read: table.records.len(),
        dropped_blank_rows: table.dropped_blank_rows,
        ignored_columns: table.ignored_columns,
        ..NormalizedBatch::default()
    };
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (index, record) in normalized.into_iter().enumerate() {
        if record.id.is_empty() {
            warn!(
                row = index + 1,
                product = %redact_value(&record.product),
                "skipping row without an identifier"
            );
            batch.skipped_empty_id += 1;
            continue;
        }
        if let Some(&position) = positions.get(&record.id) {
            warn!(id = %record.id, "duplicate identifier, keeping the later row");
            if !batch.duplicate_ids.contains(&record.id) {
                batch.duplicate_ids.push(record.id.clone());
            }
            batch.records[position] = record;
        } else {
            positions.insert(record.id.clone(), batch.records.len());
            batch.records.push(record);
        }
    }
    Ok(batch)
}

/// Ingest a source file into the store and record the run.
pub fn ingest_file(
    store: &mut Store,
    path: &Path,
    normalizer: &RowNormalizer,
    mode: WriteMode,
) -> Result<IngestOutcome> {
    let span = info_span!("ingest", source = %path.display(), mode = %mode);
    let _guard = span.enter();
    let start = Instant::now();

    let sha256 = file_fingerprint(path).with_context(|| format!("hash {}", path.display()))?;
    let batch = normalize_source(path, normalizer)?;
    let rows_written = store
        .write_batch(&batch.records, mode)
        .context("write records")?;

    let source = path.display().to_string();
    let run_id = store
        .record_ingest_run(&NewIngestRun {
            source: &source,
            sha256: &sha256,
            rows_read: count_i64(batch.rows_read),
            rows_written: count_i64(rows_written),
            rows_skipped: count_i64(batch.skipped_empty_id),
            mode,
        })
        .context("record ingest run")?;

    info!(
        rows_read = batch.rows_read,
        rows_written,
        skipped = batch.skipped_empty_id,
        duplicates = batch.duplicate_ids.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );

    Ok(IngestOutcome {
        source: path.to_path_buf(),
        sha256,
        mode,
        rows_read: batch.rows_read,
        dropped_blank_rows: batch.dropped_blank_rows,
        skipped_empty_id: batch.skipped_empty_id,
        duplicate_ids: batch.duplicate_ids,
        ignored_columns: batch.ignored_columns,
        rows_written,
        run_id,
    })
}

fn count_i64(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

/// Open the configured database, populating it from the source file while it
/// has never been filled.
///
/// A store counts as unfilled while it holds no movements and no ingest run,
/// so a failed first ingest is retried on the next command. Returns the
/// ingest outcome when auto-initialisation ran.
pub fn open_store(settings: &Settings) -> Result<(Store, Option<IngestOutcome>)> {
    let mut store = Store::open(&settings.database)
        .with_context(|| format!("open database {}", settings.database.display()))?;
    if !store.is_pristine().context("inspect database")? {
        return Ok((store, None));
    }
    if !settings.source.exists() {
        info!(
            database = %settings.database.display(),
            "database is empty (no source file found)"
        );
        return Ok((store, None));
    }
    info!(
        database = %settings.database.display(),
        source = %settings.source.display(),
        "initialising database from source file"
    );
    let normalizer = RowNormalizer::new(settings.normalization.clone());
    let outcome = ingest_file(&mut store, &settings.source, &normalizer, WriteMode::Replace)?;
    Ok((store, Some(outcome)))
}

/// Write records as CSV with the canonical column names.
pub fn write_records_csv<W: Write>(records: &[InventoryRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record).context("write csv row")?;
    }
    csv_writer.flush().context("flush csv output")?;
    Ok(())
}
