//! Source column definitions for inventory movement rows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// One of the eight columns of an inventory movement row.
///
/// The declaration order is the canonical column order used for
/// storage and CSV output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Id,
    Date,
    Product,
    Category,
    MovementType,
    Quantity,
    UnitPrice,
    Seller,
}

impl Field {
    /// All fields in canonical column order.
    pub const ALL: [Field; 8] = [
        Field::Id,
        Field::Date,
        Field::Product,
        Field::Category,
        Field::MovementType,
        Field::Quantity,
        Field::UnitPrice,
        Field::Seller,
    ];

    /// Fields that are trimmed as free text before any other rule runs.
    pub const TEXT: [Field; 5] = [
        Field::Id,
        Field::Product,
        Field::Category,
        Field::MovementType,
        Field::Seller,
    ];

    /// Column name as it appears in the spreadsheet export and the database.
    pub fn column_name(self) -> &'static str {
        match self {
            Field::Id => "ID_Movimiento",
            Field::Date => "Fecha",
            Field::Product => "Nombre_Producto",
            Field::Category => "Categoria",
            Field::MovementType => "Tipo_Movimiento",
            Field::Quantity => "Cantidad",
            Field::UnitPrice => "Precio_Unitario",
            Field::Seller => "Vendedor",
        }
    }

    /// Match a header cell to a field.
    ///
    /// Matching ignores ASCII case, surrounding whitespace and a leading BOM.
    pub fn from_header(header: &str) -> Option<Field> {
        let cleaned = header.trim().trim_matches('\u{feff}').trim();
        Field::ALL
            .into_iter()
            .find(|field| field.column_name().eq_ignore_ascii_case(cleaned))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Field {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_header(s).ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_matching_is_lenient() {
        assert_eq!(Field::from_header("ID_Movimiento"), Some(Field::Id));
        assert_eq!(Field::from_header("  categoria "), Some(Field::Category));
        assert_eq!(Field::from_header("\u{feff}Fecha"), Some(Field::Date));
        assert_eq!(Field::from_header("Observaciones"), None);
    }

    #[test]
    fn unknown_field_is_an_error() {
        let err = "Stock".parse::<Field>().unwrap_err();
        assert!(matches!(err, ModelError::UnknownField(name) if name == "Stock"));
    }
}
