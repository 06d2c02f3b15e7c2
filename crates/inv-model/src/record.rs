//! Normalized inventory movement records.

use serde::{Deserialize, Serialize};

use crate::Category;

/// Movement type label for stock coming in.
pub const ENTRADA: &str = "Entrada";
/// Movement type label for stock going out (a sale).
pub const SALIDA: &str = "Salida";

/// A row after every field rule has been applied, ready for storage.
///
/// Serialized field names match the source columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    #[serde(rename = "ID_Movimiento")]
    pub id: String,
    /// Canonical `YYYY-MM-DD`, or `None` when the source date was unparseable.
    #[serde(rename = "Fecha")]
    pub date: Option<String>,
    #[serde(rename = "Nombre_Producto")]
    pub product: String,
    #[serde(rename = "Categoria")]
    pub category: Category,
    #[serde(rename = "Tipo_Movimiento")]
    pub movement_type: String,
    #[serde(rename = "Cantidad")]
    pub quantity: i64,
    #[serde(rename = "Precio_Unitario")]
    pub unit_price: f64,
    #[serde(rename = "Vendedor")]
    pub seller: String,
}

impl InventoryRecord {
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}
