//! Manual create and update of stored movements.

use anyhow::{Context, Result};
use clap::Args;
use inv_model::{InventoryRecord, NormalizationOptions};
use inv_normalization::{ManualEdit, prepare_manual_record};
use inv_store::{Store, StoreError};
use tracing::info;

/// Field values for create/update, as typed by the user. `None` leaves the
/// field as it is.
#[derive(Debug, Clone, Default, Args)]
pub struct FieldChanges {
    #[arg(long = "date")]
    pub date: Option<String>,

    #[arg(long = "product")]
    pub product: Option<String>,

    #[arg(long = "category")]
    pub category: Option<String>,

    #[arg(long = "movement-type")]
    pub movement_type: Option<String>,

    #[arg(long = "quantity", allow_hyphen_values = true)]
    pub quantity: Option<String>,

    #[arg(long = "price", allow_hyphen_values = true)]
    pub price: Option<String>,

    #[arg(long = "seller")]
    pub seller: Option<String>,
}

impl FieldChanges {
    pub fn apply_to(&self, edit: &mut ManualEdit) {
        let targets = [
            (&self.date, &mut edit.date),
            (&self.product, &mut edit.product),
            (&self.category, &mut edit.category),
            (&self.movement_type, &mut edit.movement_type),
            (&self.quantity, &mut edit.quantity),
            (&self.price, &mut edit.unit_price),
            (&self.seller, &mut edit.seller),
        ];
        for (value, target) in targets {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }
    }
}

/// Create a movement. Quantity and price default to zero.
pub fn create_movement(
    store: &Store,
    options: &NormalizationOptions,
    id: &str,
    changes: &FieldChanges,
) -> Result<InventoryRecord> {
    let mut edit = ManualEdit {
        id: id.to_string(),
        quantity: "0".to_string(),
        unit_price: "0".to_string(),
        ..ManualEdit::default()
    };
    changes.apply_to(&mut edit);
    let record = prepare_manual_record(&edit, options)?;
    store.insert(&record)?;
    info!(id = %record.id, category = %record.category, "created movement");
    Ok(record)
}

/// Apply changes to a stored movement; fields without a change keep their
/// stored value before the edit policy runs.
pub fn update_movement(
    store: &Store,
    options: &NormalizationOptions,
    id: &str,
    changes: &FieldChanges,
) -> Result<InventoryRecord> {
    let Some(existing) = store.get(id).context("read movement")? else {
        return Err(StoreError::NotFound(id.to_string()).into());
    };
    let mut edit = ManualEdit::from_record(&existing);
    changes.apply_to(&mut edit);
    let record = prepare_manual_record(&edit, options)?;
    store.update(&record)?;
    info!(id = %record.id, category = %record.category, "updated movement");
    Ok(record)
}
