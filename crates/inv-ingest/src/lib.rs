//! Inventory spreadsheet ingestion.
//!
//! Reads the movement spreadsheet export into a [`RawTable`]: header cells are
//! matched to fields, unknown columns are skipped, empty cells become
//! [`RawValue::Missing`](inv_model::RawValue::Missing) and blank rows are
//! dropped. CSV and TSV are always available; `.xlsx`/`.xls`/`.ods` workbooks
//! need the `xlsx` feature.

mod csv_table;
mod error;
mod fingerprint;
mod headers;
#[cfg(feature = "xlsx")]
mod workbook;

use std::path::Path;
use std::time::Instant;

use inv_model::RawTable;
use tracing::info;

pub use csv_table::read_csv_table;
pub use error::{IngestError, Result};
pub use fingerprint::file_fingerprint;
#[cfg(feature = "xlsx")]
pub use workbook::read_workbook;

/// Source file layout, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Tsv,
    Workbook,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xlsx" | "xlsm" | "xls" | "xlsb" | "ods") => SourceFormat::Workbook,
            Some("tsv" | "tab") => SourceFormat::Tsv,
            _ => SourceFormat::Csv,
        }
    }
}

/// Read a source spreadsheet, dispatching on its extension.
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    let start = Instant::now();
    let table = match SourceFormat::from_path(path) {
        SourceFormat::Csv => read_csv_table(path, b',')?,
        SourceFormat::Tsv => read_csv_table(path, b'\t')?,
        SourceFormat::Workbook => read_workbook_source(path)?,
    };
    info!(
        path = %path.display(),
        rows = table.records.len(),
        columns = table.columns.len(),
        ignored_columns = table.ignored_columns.len(),
        dropped_blank_rows = table.dropped_blank_rows,
        duration_ms = start.elapsed().as_millis(),
        "read source table"
    );
    Ok(table)
}

#[cfg(feature = "xlsx")]
fn read_workbook_source(path: &Path) -> Result<RawTable> {
    read_workbook(path)
}

#[cfg(not(feature = "xlsx"))]
fn read_workbook_source(path: &Path) -> Result<RawTable> {
    Err(IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default(),
    })
}
