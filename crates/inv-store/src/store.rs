use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use inv_model::{Category, InventoryRecord};
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::query::Conditions;
use crate::schema::migrate;

const RECORD_COLUMNS: &str = "ID_Movimiento, Fecha, Nombre_Producto, Categoria, \
                              Tipo_Movimiento, Cantidad, Precio_Unitario, Vendedor";

const UPSERT_RECORD: &str = r#"
INSERT INTO inventario (ID_Movimiento, Fecha, Nombre_Producto, Categoria,
                        Tipo_Movimiento, Cantidad, Precio_Unitario, Vendedor)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
ON CONFLICT(ID_Movimiento) DO UPDATE SET
  Fecha           = excluded.Fecha,
  Nombre_Producto = excluded.Nombre_Producto,
  Categoria       = excluded.Categoria,
  Tipo_Movimiento = excluded.Tipo_Movimiento,
  Cantidad        = excluded.Cantidad,
  Precio_Unitario = excluded.Precio_Unitario,
  Vendedor        = excluded.Vendedor
"#;

/// How a batch of records is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Clear the table, then write the batch.
    #[default]
    Replace,
    /// Keep existing rows; a record with a stored id overwrites it.
    Append,
}

impl WriteMode {
    pub fn as_str(self) -> &'static str {
        match self {
            WriteMode::Replace => "replace",
            WriteMode::Append => "append",
        }
    }
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional filters for [`Store::list`], combined with AND.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub category: Option<String>,
    pub movement_type: Option<String>,
}

/// One row of the `ingest_runs` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestRun {
    pub id: i64,
    pub source: String,
    pub sha256: String,
    pub rows_read: i64,
    pub rows_written: i64,
    pub rows_skipped: i64,
    pub mode: String,
    pub ingested_at: String,
}

/// Values recorded for a new ingest run.
#[derive(Debug, Clone)]
pub struct NewIngestRun<'a> {
    pub source: &'a str,
    pub sha256: &'a str,
    pub rows_read: i64,
    pub rows_written: i64,
    pub rows_skipped: i64,
    pub mode: WriteMode,
}

/// SQLite-backed movement store. Owns a single connection.
pub struct Store {
    pub(crate) conn: Connection,
}

impl Store {
    /// Open or create a database file, creating its parent directory.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(path)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
        migrate(&conn)?;
        debug!(path = %path.display(), "opened store");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrate(&conn)?;
        Ok(Self { conn })
    }

    /// Write a batch in one transaction. Returns the number of rows written.
    ///
    /// Within a batch, a repeated id keeps the last record.
    pub fn write_batch(&mut self, records: &[InventoryRecord], mode: WriteMode) -> Result<usize> {
        let start = Instant::now();
        let tx = self.conn.transaction()?;
        if mode == WriteMode::Replace {
            tx.execute("DELETE FROM inventario", [])?;
        }
        {
            let mut stmt = tx.prepare(UPSERT_RECORD)?;
            for record in records {
                stmt.execute(record_params(record))?;
            }
        }
        tx.commit()?;
        info!(
            rows = records.len(),
            mode = %mode,
            duration_ms = start.elapsed().as_millis(),
            "wrote batch"
        );
        Ok(records.len())
    }

    /// Insert a new movement.
    pub fn insert(&self, record: &InventoryRecord) -> Result<()> {
        let inserted = self.conn.execute(
            &format!(
                "INSERT INTO inventario ({RECORD_COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) \
                 ON CONFLICT(ID_Movimiento) DO NOTHING"
            ),
            record_params(record),
        )?;
        if inserted == 0 {
            return Err(StoreError::DuplicateId(record.id.clone()));
        }
        debug!(id = %record.id, "inserted movement");
        Ok(())
    }

    /// Overwrite every field of an existing movement.
    pub fn update(&self, record: &InventoryRecord) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE inventario SET Fecha = ?2, Nombre_Producto = ?3, Categoria = ?4, \
             Tipo_Movimiento = ?5, Cantidad = ?6, Precio_Unitario = ?7, Vendedor = ?8 \
             WHERE ID_Movimiento = ?1",
            record_params(record),
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(record.id.clone()));
        }
        debug!(id = %record.id, "updated movement");
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM inventario WHERE ID_Movimiento = ?1", [id])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        debug!(id, "deleted movement");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<InventoryRecord>> {
        let record = self
            .conn
            .query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM inventario WHERE ID_Movimiento = ?1"),
                [id],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Movements matching the filter, ordered by id.
    pub fn list(&self, filter: &ListFilter) -> Result<Vec<InventoryRecord>> {
        let mut conditions = Conditions::default();
        if let Some(category) = &filter.category {
            conditions.push("Categoria = ?", category);
        }
        if let Some(movement_type) = &filter.movement_type {
            conditions.push("Tipo_Movimiento = ?", movement_type);
        }
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM inventario{} ORDER BY ID_Movimiento",
            conditions.where_clause()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(conditions.params()), record_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM inventario", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// True when the store holds no movements and no ingest has been recorded.
    pub fn is_pristine(&self) -> Result<bool> {
        let pristine = self.conn.query_row(
            "SELECT NOT EXISTS (SELECT 1 FROM inventario) \
             AND NOT EXISTS (SELECT 1 FROM ingest_runs)",
            [],
            |row| row.get(0),
        )?;
        Ok(pristine)
    }

    pub fn categories(&self) -> Result<Vec<String>> {
        self.distinct("Categoria")
    }

    pub fn movement_types(&self) -> Result<Vec<String>> {
        self.distinct("Tipo_Movimiento")
    }

    pub fn sellers(&self) -> Result<Vec<String>> {
        self.distinct("Vendedor")
    }

    /// Sorted distinct non-null values of a column.
    fn distinct(&self, column: &'static str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT DISTINCT {column} FROM inventario WHERE {column} IS NOT NULL ORDER BY {column}"
        ))?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Record an ingest run and return its id.
    pub fn record_ingest_run(&self, run: &NewIngestRun<'_>) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO ingest_runs \
             (source, sha256, rows_read, rows_written, rows_skipped, mode, ingested_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                run.source,
                run.sha256,
                run.rows_read,
                run.rows_written,
                run.rows_skipped,
                run.mode.as_str(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Ingest runs, most recent first.
    pub fn ingest_runs(&self) -> Result<Vec<IngestRun>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, source, sha256, rows_read, rows_written, rows_skipped, mode, ingested_at \
             FROM ingest_runs ORDER BY id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(IngestRun {
                id: row.get(0)?,
                source: row.get(1)?,
                sha256: row.get(2)?,
                rows_read: row.get(3)?,
                rows_written: row.get(4)?,
                rows_skipped: row.get(5)?,
                mode: row.get(6)?,
                ingested_at: row.get(7)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

fn record_params(record: &InventoryRecord) -> impl rusqlite::Params + '_ {
    (
        record.id.as_str(),
        record.date.as_deref(),
        record.product.as_str(),
        record.category.label(),
        record.movement_type.as_str(),
        record.quantity,
        record.unit_price,
        record.seller.as_str(),
    )
}

/// Read a row selected with `RECORD_COLUMNS`.
///
/// Nullable columns read as their defaults so tables written by other tools
/// still load.
fn record_from_row(row: &Row<'_>) -> rusqlite::Result<InventoryRecord> {
    let text = |idx: usize| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
    };
    Ok(InventoryRecord {
        id: text(0)?,
        date: row.get(1)?,
        product: text(2)?,
        category: Category::from(text(3)?),
        movement_type: text(4)?,
        quantity: row.get::<_, Option<i64>>(5)?.unwrap_or_default(),
        unit_price: row.get::<_, Option<f64>>(6)?.unwrap_or_default(),
        seller: text(7)?,
    })
}
