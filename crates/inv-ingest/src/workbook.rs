use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use inv_model::{RawRecord, RawTable, RawValue};

use crate::error::{IngestError, Result};
use crate::headers::map_headers;

fn workbook_error(path: &Path, message: impl ToString) -> IngestError {
    IngestError::Workbook {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

fn cell_value(cell: &Data) -> RawValue {
    match cell {
        Data::Empty | Data::Error(_) => RawValue::Missing,
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => {
            RawValue::from_cell(text.trim())
        }
        Data::Float(value) => RawValue::Number(*value),
        Data::Int(value) => RawValue::from(*value),
        Data::Bool(value) => RawValue::Text(if *value { "True" } else { "False" }.to_string()),
        Data::DateTime(value) => value
            .as_datetime()
            .map(|dt| RawValue::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()))
            .unwrap_or(RawValue::Number(value.as_f64())),
    }
}

/// Read the first worksheet of a workbook into a raw table.
///
/// Date cells are rendered as ISO date-times so they take the generic date
/// path during normalization.
pub fn read_workbook(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut workbook = open_workbook_auto(path).map_err(|err| workbook_error(path, err))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| workbook_error(path, "workbook has no sheets"))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|err| workbook_error(path, err))?;

    let mut rows = range
        .rows()
        .skip_while(|row| row.iter().all(|cell| cell_value(cell).is_blank()));
    let header_row = rows.next().ok_or_else(|| IngestError::MissingHeader {
        path: path.to_path_buf(),
    })?;
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_value(cell).as_text())
        .collect();
    let map = map_headers(headers.iter().map(String::as_str));

    let mut table = RawTable::new(map.columns.clone());
    table.ignored_columns = map.ignored;
    for row in rows {
        let mut record = RawRecord::new();
        for (idx, slot) in map.slots.iter().enumerate() {
            let Some(field) = slot else {
                continue;
            };
            let value = row.get(idx).map_or(RawValue::Missing, cell_value);
            record.insert(*field, value);
        }
        table.push_record(record);
    }
    Ok(table)
}
