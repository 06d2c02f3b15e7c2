use std::borrow::Cow;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use inv_model::{RawRecord, RawTable, RawValue};
use tracing::warn;

use crate::error::{IngestError, Result};
use crate::headers::map_headers;

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Decode and trim every cell. Invalid UTF-8 is replaced with U+FFFD and
/// logged with its line, so one bad cell degrades instead of failing the file.
fn decode_record(record: &ByteRecord) -> Vec<String> {
    let mut invalid_cells = 0usize;
    let cells = record
        .iter()
        .map(|raw| {
            let text = String::from_utf8_lossy(raw);
            if matches!(text, Cow::Owned(_)) {
                invalid_cells += 1;
            }
            normalize_cell(&text)
        })
        .collect();
    if invalid_cells > 0 {
        warn!(
            line = record.position().map(csv::Position::line),
            invalid_cells,
            "replaced invalid UTF-8 in source cells"
        );
    }
    cells
}

/// Read a delimited export into a raw table.
///
/// The first non-blank line is the header row. Rows may be shorter or
/// longer than the header; missing trailing cells read as missing values
/// and surplus cells are ignored.
pub fn read_csv_table(path: &Path, delimiter: u8) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|source| IngestError::csv(path, source))?;
    let mut records = reader.byte_records();

    let header = loop {
        let Some(record) = records.next() else {
            return Err(IngestError::MissingHeader {
                path: path.to_path_buf(),
            });
        };
        let record = record.map_err(|source| IngestError::csv(path, source))?;
        let cells = decode_record(&record);
        if cells.iter().any(|cell| !cell.is_empty()) {
            break cells;
        }
    };
    let map = map_headers(header.iter().map(String::as_str));

    let mut table = RawTable::new(map.columns.clone());
    table.ignored_columns = map.ignored;
    for record in records {
        let record = record.map_err(|source| IngestError::csv(path, source))?;
        let cells = decode_record(&record);
        let mut row = RawRecord::new();
        for (idx, slot) in map.slots.iter().enumerate() {
            let Some(field) = slot else {
                continue;
            };
            let value = cells.get(idx).map_or("", String::as_str);
            row.insert(*field, RawValue::from_cell(value));
        }
        table.push_record(row);
    }
    Ok(table)
}
