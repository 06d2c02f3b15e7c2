//! Row-level normalization: every field rule applied to one raw record.

use inv_model::{Field, InventoryRecord, NormalizationOptions, RawRecord, RawValue};
use tracing::trace;

use crate::category::resolve_category;
use crate::date::normalize_date;
use crate::movement::normalize_movement_type;
use crate::numeric::{normalize_quantity, normalize_unit_price};
use crate::text::clean_text;

/// Applies the field rules to raw records.
///
/// Stateless apart from its options; a single normalizer can be shared
/// across threads and used for any number of rows.
#[derive(Debug, Clone, Default)]
pub struct RowNormalizer {
    options: NormalizationOptions,
}

impl RowNormalizer {
    pub fn new(options: NormalizationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizationOptions {
        &self.options
    }

    /// Normalize one record. Never fails: unparseable fields fall back to
    /// their documented defaults.
    pub fn normalize(&self, raw: &RawRecord) -> InventoryRecord {
        let id = clean_text(raw.value(Field::Id));
        let product = clean_text(raw.value(Field::Product));
        let category_text = clean_text(raw.value(Field::Category));
        let movement_text = clean_text(raw.value(Field::MovementType));
        let seller = clean_text(raw.value(Field::Seller));

        let product_hint = raw.has(Field::Product).then_some(product.as_str());
        let category = resolve_category(&category_text, product_hint);
        let movement_type = normalize_movement_type(&movement_text);
        let quantity = normalize_quantity(raw.value(Field::Quantity));
        let unit_price = normalize_unit_price(raw.value(Field::UnitPrice));
        let date = normalize_date(raw.value(Field::Date), self.options.locale_year);

        trace!(id = %id, category = %category, has_date = date.is_some(), "normalized row");

        InventoryRecord {
            id,
            date,
            product,
            category,
            movement_type,
            quantity,
            unit_price,
            seller,
        }
    }

    /// Normalize rows independently, preserving their order.
    pub fn normalize_batch(&self, rows: &[RawRecord]) -> Vec<InventoryRecord> {
        rows.iter().map(|row| self.normalize(row)).collect()
    }
}

/// Normalize one record with default options.
pub fn normalize_record(raw: &RawRecord) -> InventoryRecord {
    RowNormalizer::default().normalize(raw)
}

/// Convert a normalized record back into raw form.
///
/// Normalizing the result yields the same record again.
pub fn to_raw(record: &InventoryRecord) -> RawRecord {
    RawRecord::new()
        .with(Field::Id, record.id.as_str())
        .with(
            Field::Date,
            record
                .date
                .as_deref()
                .map_or(RawValue::Missing, RawValue::from),
        )
        .with(Field::Product, record.product.as_str())
        .with(Field::Category, record.category.label())
        .with(Field::MovementType, record.movement_type.as_str())
        .with(Field::Quantity, record.quantity)
        .with(Field::UnitPrice, record.unit_price)
        .with(Field::Seller, record.seller.as_str())
}
