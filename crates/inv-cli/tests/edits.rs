//! Create and update through the manual-edit path.

use inv_cli::edits::{FieldChanges, create_movement, update_movement};
use inv_model::{Category, ManualEditPolicy, NormalizationOptions};
use inv_store::{Store, StoreError};

fn laptop_sale(date: Option<&str>, price: &str) -> FieldChanges {
    FieldChanges {
        date: date.map(str::to_string),
        product: Some("Laptop Dell".to_string()),
        category: Some(String::new()),
        movement_type: Some("Salida".to_string()),
        quantity: Some("2".to_string()),
        price: Some(price.to_string()),
        seller: Some("Ana".to_string()),
    }
}

fn only_category(category: &str) -> FieldChanges {
    FieldChanges {
        category: Some(category.to_string()),
        ..FieldChanges::default()
    }
}

fn assert_update_keeps_other_fields(options: &NormalizationOptions) {
    let store = Store::open_in_memory().expect("store");
    let cases = [
        ("M-1", Some("2026-03-15"), "1250.5"),
        ("M-2", None, "19.99"),
        ("M-3", Some("2025-12-31"), "0.30000000000000004"),
    ];

    for (id, date, price) in cases {
        let created =
            create_movement(&store, options, id, &laptop_sale(date, price)).expect("create");
        assert_eq!(created.category, Category::Electronica);

        let updated =
            update_movement(&store, options, id, &only_category("papel")).expect("update");

        let mut expected = created.clone();
        expected.category = Category::Papeleria;
        assert_eq!(updated, expected, "{id}");
        assert_eq!(store.get(id).expect("get"), Some(expected), "{id}");
    }
}

#[test]
fn update_keeps_unchanged_fields_with_category_only_edits() {
    assert_update_keeps_other_fields(&NormalizationOptions::default());
}

#[test]
fn update_keeps_unchanged_fields_with_full_edits() {
    let options = NormalizationOptions::default().with_manual_edits(ManualEditPolicy::Full);
    assert_update_keeps_other_fields(&options);
}

#[test]
fn create_defaults_numbers_to_zero() {
    let store = Store::open_in_memory().expect("store");
    let changes = FieldChanges {
        product: Some("Escoba".to_string()),
        ..FieldChanges::default()
    };

    let record = create_movement(&store, &NormalizationOptions::default(), "M-9", &changes)
        .expect("create");

    assert_eq!(record.quantity, 0);
    assert_eq!(record.unit_price, 0.0);
    assert_eq!(record.date, None);
    assert_eq!(record.category, Category::Limpieza);
}

#[test]
fn update_of_unknown_id_is_not_found() {
    let store = Store::open_in_memory().expect("store");

    let error = update_movement(
        &store,
        &NormalizationOptions::default(),
        "M-404",
        &only_category("Limpieza"),
    )
    .expect_err("unknown id");

    assert!(matches!(
        error.downcast_ref::<StoreError>(),
        Some(StoreError::NotFound(id)) if id == "M-404"
    ));
}
