#![deny(unsafe_code)]

use std::collections::BTreeMap;

use crate::Field;

/// An untyped cell read from the source spreadsheet.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum RawValue {
    Text(String),
    Number(f64),
    Missing,
}

impl RawValue {
    /// Build a value from a text cell, mapping empty cells to `Missing`.
    pub fn from_cell(cell: &str) -> Self {
        if cell.is_empty() {
            RawValue::Missing
        } else {
            RawValue::Text(cell.to_string())
        }
    }

    /// Textual representation used before any field rule is applied.
    ///
    /// Integral numbers render without a fractional part so that spreadsheet
    /// cells such as `1001.0` become `"1001"`.
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Text(text) => text.clone(),
            RawValue::Number(value) => format_number(*value),
            RawValue::Missing => String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Text(text) => text.trim().is_empty(),
            RawValue::Number(_) => false,
            RawValue::Missing => true,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// A source row before normalization.
///
/// Only fields that exist as columns in the source are present. A present
/// field can still hold [`RawValue::Missing`].
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawRecord {
    pub cells: BTreeMap<Field, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and fixtures.
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<RawValue>) -> Self {
        self.cells.insert(field, value.into());
        self
    }

    pub fn insert(&mut self, field: Field, value: RawValue) {
        self.cells.insert(field, value);
    }

    pub fn get(&self, field: Field) -> Option<&RawValue> {
        self.cells.get(&field)
    }

    /// Value of a field, treating an absent column as missing.
    pub fn value(&self, field: Field) -> &RawValue {
        self.cells.get(&field).unwrap_or(&RawValue::Missing)
    }

    pub fn has(&self, field: Field) -> bool {
        self.cells.contains_key(&field)
    }

    /// True when every present cell is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(RawValue::is_blank)
    }
}

/// All rows read from one source file.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RawTable {
    /// Recognised columns, in source order.
    pub columns: Vec<Field>,
    /// Source headers that did not match any field.
    pub ignored_columns: Vec<String>,
    pub records: Vec<RawRecord>,
    /// Number of entirely blank rows dropped while reading.
    pub dropped_blank_rows: usize,
}

impl RawTable {
    pub fn new(columns: Vec<Field>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Push a row, dropping it if every cell is blank.
    pub fn push_record(&mut self, record: RawRecord) {
        if record.is_blank() {
            self.dropped_blank_rows += 1;
        } else {
            self.records.push(record);
        }
    }

    pub fn has_column(&self, field: Field) -> bool {
        self.columns.contains(&field)
    }
}
