//! Product categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label used when no category can be determined.
pub const SIN_CATEGORIA: &str = "Sin Categoría";

/// A product category: one of the four canonical categories, the sentinel,
/// or a free-text fallback kept in title case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Mobiliario,
    Electronica,
    Papeleria,
    Limpieza,
    #[default]
    SinCategoria,
    Other(String),
}

impl Category {
    /// The canonical categories, in keyword-table order.
    pub const KNOWN: [Category; 4] = [
        Category::Electronica,
        Category::Mobiliario,
        Category::Papeleria,
        Category::Limpieza,
    ];

    pub fn label(&self) -> &str {
        match self {
            Category::Mobiliario => "Mobiliario",
            Category::Electronica => "Electrónica",
            Category::Papeleria => "Papelería",
            Category::Limpieza => "Limpieza",
            Category::SinCategoria => SIN_CATEGORIA,
            Category::Other(label) => label,
        }
    }

    /// Resolve a stored label back to a category without applying any rules.
    pub fn from_label(label: &str) -> Category {
        match label {
            "Mobiliario" => Category::Mobiliario,
            "Electrónica" => Category::Electronica,
            "Papelería" => Category::Papeleria,
            "Limpieza" => Category::Limpieza,
            SIN_CATEGORIA => Category::SinCategoria,
            other => Category::Other(other.to_string()),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Category::SinCategoria)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_label(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}
