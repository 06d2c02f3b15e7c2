use inv_model::{Category, ENTRADA, InventoryRecord, SALIDA};
use inv_store::{ListFilter, NewIngestRun, SCHEMA_VERSION, Store, StoreError, WriteMode};
use tempfile::TempDir;

fn movement(id: &str, category: Category, movement_type: &str, quantity: i64) -> InventoryRecord {
    InventoryRecord {
        id: id.to_string(),
        date: Some("2026-03-15".to_string()),
        product: format!("Producto {id}"),
        category,
        movement_type: movement_type.to_string(),
        quantity,
        unit_price: 10.5,
        seller: "Ana".to_string(),
    }
}

#[test]
fn insert_get_and_duplicate() {
    let store = Store::open_in_memory().expect("store");
    let record = movement("M-1", Category::Mobiliario, ENTRADA, 3);

    store.insert(&record).expect("insert");
    assert_eq!(store.get("M-1").expect("get"), Some(record.clone()));
    assert_eq!(store.get("M-2").expect("get"), None);

    let err = store.insert(&record).expect_err("duplicate");
    assert!(matches!(err, StoreError::DuplicateId(ref id) if id == "M-1"));
    assert!(err.suggestion().is_some());
}

#[test]
fn update_and_delete_require_existing_ids() {
    let store = Store::open_in_memory().expect("store");
    let mut record = movement("M-1", Category::Limpieza, SALIDA, 1);

    assert!(matches!(store.update(&record), Err(StoreError::NotFound(_))));
    store.insert(&record).expect("insert");

    record.quantity = 9;
    record.date = None;
    record.category = Category::Other("Herramientas".to_string());
    store.update(&record).expect("update");
    assert_eq!(store.get("M-1").expect("get"), Some(record));

    store.delete("M-1").expect("delete");
    assert!(matches!(store.delete("M-1"), Err(StoreError::NotFound(_))));
    assert_eq!(store.count().expect("count"), 0);
}

#[test]
fn replace_clears_and_append_upserts() {
    let mut store = Store::open_in_memory().expect("store");
    let first = vec![
        movement("A", Category::Mobiliario, ENTRADA, 1),
        movement("B", Category::Mobiliario, ENTRADA, 2),
    ];
    store.write_batch(&first, WriteMode::Replace).expect("replace");

    let second = vec![
        movement("B", Category::Limpieza, SALIDA, 5),
        movement("C", Category::Papeleria, SALIDA, 7),
        movement("C", Category::Papeleria, SALIDA, 8),
    ];
    store.write_batch(&second, WriteMode::Append).expect("append");

    let ids: Vec<String> = store
        .list(&ListFilter::default())
        .expect("list")
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
    let b = store.get("B").expect("get").expect("B stored");
    assert_eq!(b.category, Category::Limpieza);
    assert_eq!(store.get("C").expect("get").expect("C stored").quantity, 8);

    store
        .write_batch(&[movement("Z", Category::SinCategoria, ENTRADA, 0)], WriteMode::Replace)
        .expect("replace");
    assert_eq!(store.count().expect("count"), 1);
}

#[test]
fn list_filters_and_distinct_values() {
    let mut store = Store::open_in_memory().expect("store");
    let mut other_seller = movement("C", Category::Electronica, SALIDA, 1);
    other_seller.seller = "Luis".to_string();
    store
        .write_batch(
            &[
                movement("B", Category::Mobiliario, SALIDA, 1),
                movement("A", Category::Mobiliario, ENTRADA, 1),
                other_seller,
            ],
            WriteMode::Replace,
        )
        .expect("write");

    let filter = ListFilter {
        category: Some("Mobiliario".to_string()),
        movement_type: Some(SALIDA.to_string()),
    };
    let listed = store.list(&filter).expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "B");

    assert_eq!(store.categories().expect("categories"), vec!["Electrónica", "Mobiliario"]);
    assert_eq!(store.movement_types().expect("types"), vec![ENTRADA, SALIDA]);
    assert_eq!(store.sellers().expect("sellers"), vec!["Ana", "Luis"]);
}

#[test]
fn ingest_runs_are_recorded() {
    let store = Store::open_in_memory().expect("store");
    let run = NewIngestRun {
        source: "sistema crud.csv",
        sha256: "abc123",
        rows_read: 10,
        rows_written: 8,
        rows_skipped: 2,
        mode: WriteMode::Replace,
    };
    let first = store.record_ingest_run(&run).expect("record");
    let second = store
        .record_ingest_run(&NewIngestRun {
            mode: WriteMode::Append,
            ..run
        })
        .expect("record");
    assert!(second > first);

    let runs = store.ingest_runs().expect("runs");
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].mode, "append");
    assert_eq!(runs[1].rows_skipped, 2);
    assert!(chrono::DateTime::parse_from_rfc3339(&runs[0].ingested_at).is_ok());
}

#[test]
fn pristine_until_movements_or_runs_exist() {
    let store = Store::open_in_memory().expect("store");
    assert!(store.is_pristine().expect("pristine"));

    store
        .insert(&movement("M-1", Category::Limpieza, ENTRADA, 1))
        .expect("insert");
    assert!(!store.is_pristine().expect("pristine"));
    store.delete("M-1").expect("delete");
    assert!(store.is_pristine().expect("pristine"));

    store
        .record_ingest_run(&NewIngestRun {
            source: "vacío.csv",
            sha256: "00",
            rows_read: 0,
            rows_written: 0,
            rows_skipped: 0,
            mode: WriteMode::Replace,
        })
        .expect("record");
    assert!(!store.is_pristine().expect("pristine"));
}

#[test]
fn file_store_persists_and_stamps_schema() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("nested").join("inventario.db");

    {
        let store = Store::open(&path).expect("open");
        store
            .insert(&movement("M-1", Category::Papeleria, ENTRADA, 4))
            .expect("insert");
    }

    let store = Store::open(&path).expect("reopen");
    assert_eq!(store.count().expect("count"), 1);

    let conn = rusqlite::Connection::open(&path).expect("raw connection");
    let version: i64 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .expect("user_version");
    assert_eq!(version, SCHEMA_VERSION);
}

#[test]
fn newer_schema_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("future.db");
    let conn = rusqlite::Connection::open(&path).expect("raw connection");
    conn.pragma_update(None, "user_version", SCHEMA_VERSION + 1)
        .expect("set version");
    drop(conn);

    assert!(matches!(
        Store::open(&path),
        Err(StoreError::UnsupportedSchema { .. })
    ));
}

#[test]
fn legacy_tables_with_nulls_still_load() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("legacy.db");
    let conn = rusqlite::Connection::open(&path).expect("raw connection");
    conn.execute_batch(
        "CREATE TABLE inventario (ID_Movimiento TEXT, Fecha TEXT, Nombre_Producto TEXT, \
         Categoria TEXT, Tipo_Movimiento TEXT, Cantidad INTEGER, Precio_Unitario REAL, \
         Vendedor TEXT);
         INSERT INTO inventario (ID_Movimiento, Categoria) VALUES ('L-1', 'Limpieza');",
    )
    .expect("legacy table");
    drop(conn);

    let store = Store::open(&path).expect("open legacy");
    let record = store.get("L-1").expect("get").expect("stored");
    assert_eq!(record.category, Category::Limpieza);
    assert_eq!(record.quantity, 0);
    assert_eq!(record.product, "");
    assert_eq!(record.date, None);
}
