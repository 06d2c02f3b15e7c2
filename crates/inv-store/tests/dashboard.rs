use inv_model::{Category, ENTRADA, InventoryRecord, SALIDA};
use inv_store::{DashboardFilter, Store, WriteMode};

fn movement(
    id: &str,
    date: Option<&str>,
    category: Category,
    movement_type: &str,
    quantity: i64,
    unit_price: f64,
    seller: &str,
) -> InventoryRecord {
    InventoryRecord {
        id: id.to_string(),
        date: date.map(str::to_string),
        product: String::new(),
        category,
        movement_type: movement_type.to_string(),
        quantity,
        unit_price,
        seller: seller.to_string(),
    }
}

fn seeded_store() -> Store {
    let mut store = Store::open_in_memory().expect("store");
    let records = vec![
        movement("M-1", Some("2026-03-01"), Category::Electronica, SALIDA, 2, 100.0, "Ana"),
        movement("M-2", Some("2026-03-01"), Category::Mobiliario, SALIDA, 1, 50.125, "Luis"),
        movement("M-3", Some("2026-03-02"), Category::Electronica, SALIDA, 3, 10.0, "Luis"),
        movement("M-4", Some("2026-03-02"), Category::Limpieza, ENTRADA, 40, 2.0, "Ana"),
        movement("M-5", None, Category::Papeleria, SALIDA, 5, 1.0, "Marta"),
    ];
    store.write_batch(&records, WriteMode::Replace).expect("seed");
    store
}

#[test]
fn unfiltered_dashboard() {
    let dashboard = seeded_store()
        .dashboard(&DashboardFilter::default())
        .expect("dashboard");

    // Sales only: 200 + 50.125 + 30 + 5.
    assert_eq!(dashboard.kpis.total_revenue, 285.13);
    // Items and transactions count every movement.
    assert_eq!(dashboard.kpis.total_items, 51);
    assert_eq!(dashboard.kpis.transactions, 5);

    let sellers: Vec<(&str, f64)> = dashboard
        .revenue_by_seller
        .iter()
        .map(|s| (s.seller.as_str(), s.total))
        .collect();
    assert_eq!(sellers, vec![("Ana", 200.0), ("Luis", 80.13), ("Marta", 5.0)]);

    let categories: Vec<(&str, i64)> = dashboard
        .top_categories
        .iter()
        .map(|c| (c.category.as_str(), c.total))
        .collect();
    assert_eq!(
        categories,
        vec![("Electrónica", 5), ("Papelería", 5), ("Mobiliario", 1)]
    );

    let trend: Vec<(Option<&str>, f64)> = dashboard
        .revenue_trend
        .iter()
        .map(|d| (d.date.as_deref(), d.total))
        .collect();
    assert_eq!(
        trend,
        vec![(None, 5.0), (Some("2026-03-01"), 250.13), (Some("2026-03-02"), 30.0)]
    );

    assert_eq!(
        dashboard.filters.categories,
        vec!["Electrónica", "Limpieza", "Mobiliario", "Papelería"]
    );
    assert_eq!(dashboard.filters.sellers, vec!["Ana", "Luis", "Marta"]);
}

#[test]
fn filters_combine_with_and() {
    let store = seeded_store();
    let filter = DashboardFilter {
        from: Some("2026-03-02".to_string()),
        to: Some("2026-03-31".to_string()),
        category: None,
        seller: Some("Luis".to_string()),
    };
    let dashboard = store.dashboard(&filter).expect("dashboard");

    assert_eq!(dashboard.kpis.total_revenue, 30.0);
    assert_eq!(dashboard.kpis.total_items, 3);
    assert_eq!(dashboard.kpis.transactions, 1);
    // Filter lists stay unfiltered.
    assert_eq!(dashboard.filters.sellers.len(), 3);
}

#[test]
fn empty_strings_do_not_filter() {
    let store = seeded_store();
    let filter = DashboardFilter {
        from: Some(String::new()),
        to: Some(String::new()),
        category: Some(String::new()),
        seller: Some(String::new()),
    };
    let dashboard = store.dashboard(&filter).expect("dashboard");
    assert_eq!(dashboard.kpis.transactions, 5);
}

#[test]
fn empty_store_has_zero_kpis() {
    let dashboard = Store::open_in_memory()
        .expect("store")
        .dashboard(&DashboardFilter::default())
        .expect("dashboard");
    assert_eq!(dashboard.kpis.total_revenue, 0.0);
    assert_eq!(dashboard.kpis.total_items, 0);
    assert_eq!(dashboard.kpis.transactions, 0);
    assert!(dashboard.revenue_by_seller.is_empty());
    assert!(dashboard.revenue_trend.is_empty());
}

#[test]
fn json_uses_dashboard_api_keys() {
    let store = Store::open_in_memory().expect("store");
    let json = serde_json::to_value(store.dashboard(&DashboardFilter::default()).expect("dashboard"))
        .expect("json");
    let object = json.as_object().expect("object");
    for key in ["kpis", "ingresos_vendedor", "top_categorias", "tendencia", "filtros"] {
        assert!(object.contains_key(key), "missing {key}");
    }
    assert_eq!(json["kpis"]["ingresos_totales"], serde_json::json!(0.0));
    assert_eq!(json["kpis"]["total_transacciones"], serde_json::json!(0));
    assert_eq!(json["filtros"]["vendedores"], serde_json::json!([]));
}
