use inv_model::Field;
use tracing::debug;

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Column layout of a source sheet.
#[derive(Debug, Clone, Default)]
pub(crate) struct HeaderMap {
    /// Field for each source column position, `None` when ignored.
    pub(crate) slots: Vec<Option<Field>>,
    pub(crate) columns: Vec<Field>,
    pub(crate) ignored: Vec<String>,
}

/// Match header cells to fields. A repeated field keeps its first column.
pub(crate) fn map_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> HeaderMap {
    let mut map = HeaderMap::default();
    for raw in headers {
        let header = normalize_header(raw);
        match Field::from_header(&header) {
            Some(field) if !map.columns.contains(&field) => {
                map.columns.push(field);
                map.slots.push(Some(field));
            }
            _ => {
                debug!(column = %header, "ignoring source column");
                map.ignored.push(header);
                map.slots.push(None);
            }
        }
    }
    map
}
