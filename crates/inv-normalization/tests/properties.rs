//! Property tests: the normalizer is total and idempotent.

use inv_model::{Field, RawRecord, RawValue};
use inv_normalization::{normalize_date, normalize_record, to_raw};
use proptest::prelude::*;

fn raw_value() -> impl Strategy<Value = RawValue> {
    prop_oneof![
        Just(RawValue::Missing),
        any::<f64>().prop_map(RawValue::Number),
        "[a-zA-Z0-9 áéíóúñÁÉÍÓÚÑßǅǆ\u{FB00}$.,/:-]{0,24}".prop_map(RawValue::Text),
        prop::sample::select(vec![
            "nan", "None", "NaT", "", "$1,250.50", "-5", "15 de marzo", "31 de febrero",
            "2025-11-02", "MOBI-Extra", "élec", "Entrd", "Slaida", "Laptop Dell", "ßabc",
        ])
        .prop_map(RawValue::from),
    ]
}

fn raw_record() -> impl Strategy<Value = RawRecord> {
    prop::collection::vec(prop::option::of(raw_value()), Field::ALL.len()).prop_map(|cells| {
        let mut record = RawRecord::new();
        for (field, cell) in Field::ALL.into_iter().zip(cells) {
            if let Some(value) = cell {
                record.insert(field, value);
            }
        }
        record
    })
}

proptest! {
    #[test]
    fn normalization_is_total(raw in raw_record()) {
        let record = normalize_record(&raw);
        prop_assert!(record.quantity >= 0);
        prop_assert!(record.unit_price.is_finite());
        prop_assert_eq!(record.id.trim(), record.id.as_str());
        if let Some(date) = &record.date {
            prop_assert_eq!(date.len(), 10);
            prop_assert!(inv_normalization::parse_calendar_date(date).is_some());
        }
    }

    #[test]
    fn normalization_is_idempotent(raw in raw_record()) {
        let once = normalize_record(&raw);
        let twice = normalize_record(&to_raw(&once));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn canonical_dates_survive(year in 1900i32..2100, month in 1u32..=12, day in 1u32..=28) {
        let text = format!("{year:04}-{month:02}-{day:02}");
        prop_assert_eq!(normalize_date(&RawValue::from(text.as_str()), 2026), Some(text));
    }
}
