//! Preparation of manually created or edited records.
//!
//! Manual edits always go through both category stages. What happens to the
//! other fields depends on [`ManualEditPolicy`]: with `CategoryOnly` they are
//! stored as submitted (only checked for the types the store needs), with
//! `Full` the whole row normalizer runs.

use inv_model::{
    Field, InventoryRecord, ManualEditPolicy, NormalizationOptions, RawRecord, RawValue,
};
use thiserror::Error;

use crate::category::resolve_category;
use crate::numeric::{parse_f64, parse_quantity_strict};
use crate::record::RowNormalizer;

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("movement id must not be empty")]
    MissingId,
    #[error("quantity is not a whole number: {0:?}")]
    InvalidQuantity(String),
    #[error("unit price is not a number: {0:?}")]
    InvalidPrice(String),
}

/// Field values as submitted by a user, before any rule runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualEdit {
    pub id: String,
    pub date: String,
    pub product: String,
    pub category: String,
    pub movement_type: String,
    pub quantity: String,
    pub unit_price: String,
    pub seller: String,
}

impl ManualEdit {
    /// Pre-fill an edit form from a stored record.
    pub fn from_record(record: &InventoryRecord) -> Self {
        Self {
            id: record.id.clone(),
            date: record.date.clone().unwrap_or_default(),
            product: record.product.clone(),
            category: record.category.label().to_string(),
            movement_type: record.movement_type.clone(),
            quantity: record.quantity.to_string(),
            unit_price: record.unit_price.to_string(),
            seller: record.seller.clone(),
        }
    }

    fn to_raw(&self) -> RawRecord {
        RawRecord::new()
            .with(Field::Id, RawValue::from_cell(&self.id))
            .with(Field::Date, RawValue::from_cell(&self.date))
            .with(Field::Product, RawValue::from_cell(&self.product))
            .with(Field::Category, RawValue::from_cell(&self.category))
            .with(Field::MovementType, RawValue::from_cell(&self.movement_type))
            .with(Field::Quantity, RawValue::from_cell(&self.quantity))
            .with(Field::UnitPrice, RawValue::from_cell(&self.unit_price))
            .with(Field::Seller, RawValue::from_cell(&self.seller))
    }
}

/// Turn a manual edit into a storable record according to the edit policy.
pub fn prepare_manual_record(
    edit: &ManualEdit,
    options: &NormalizationOptions,
) -> Result<InventoryRecord, EditError> {
    let id = edit.id.trim();
    if id.is_empty() {
        return Err(EditError::MissingId);
    }
    match options.manual_edits {
        ManualEditPolicy::Full => Ok(RowNormalizer::new(options.clone()).normalize(&edit.to_raw())),
        ManualEditPolicy::CategoryOnly => {
            let quantity = parse_quantity_strict(&edit.quantity)
                .ok_or_else(|| EditError::InvalidQuantity(edit.quantity.clone()))?;
            let unit_price = parse_f64(&edit.unit_price)
                .ok_or_else(|| EditError::InvalidPrice(edit.unit_price.clone()))?;
            let date = Some(edit.date.trim())
                .filter(|date| !date.is_empty())
                .map(str::to_string);
            Ok(InventoryRecord {
                id: id.to_string(),
                date,
                product: edit.product.clone(),
                category: resolve_category(&edit.category, Some(&edit.product)),
                movement_type: edit.movement_type.clone(),
                quantity,
                unit_price,
                seller: edit.seller.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inv_model::Category;

    fn edit() -> ManualEdit {
        ManualEdit {
            id: "M-100".to_string(),
            date: "15 de marzo".to_string(),
            product: "Mouse inalámbrico".to_string(),
            category: String::new(),
            movement_type: "Entrd".to_string(),
            quantity: "-3".to_string(),
            unit_price: "25.5".to_string(),
            seller: "Luis".to_string(),
        }
    }

    #[test]
    fn category_only_keeps_other_fields() {
        let record = prepare_manual_record(&edit(), &NormalizationOptions::default()).unwrap();
        assert_eq!(record.category, Category::Electronica);
        assert_eq!(record.date.as_deref(), Some("15 de marzo"));
        assert_eq!(record.movement_type, "Entrd");
        assert_eq!(record.quantity, -3);
    }

    #[test]
    fn full_policy_runs_every_rule() {
        let options = NormalizationOptions::default().with_manual_edits(ManualEditPolicy::Full);
        let record = prepare_manual_record(&edit(), &options).unwrap();
        assert_eq!(record.category, Category::Electronica);
        assert_eq!(record.date.as_deref(), Some("2026-03-15"));
        assert_eq!(record.movement_type, "Entrada");
        assert_eq!(record.quantity, 3);
    }

    #[test]
    fn category_only_rejects_untyped_numbers() {
        let mut bad = edit();
        bad.quantity = "tres".to_string();
        assert_eq!(
            prepare_manual_record(&bad, &NormalizationOptions::default()),
            Err(EditError::InvalidQuantity("tres".to_string()))
        );
        let mut bad = edit();
        bad.unit_price = "$25".to_string();
        assert!(matches!(
            prepare_manual_record(&bad, &NormalizationOptions::default()),
            Err(EditError::InvalidPrice(_))
        ));
    }

    #[test]
    fn id_is_required() {
        let mut bad = edit();
        bad.id = "  ".to_string();
        let full = NormalizationOptions::default().with_manual_edits(ManualEditPolicy::Full);
        assert_eq!(prepare_manual_record(&bad, &full), Err(EditError::MissingId));
    }
}
