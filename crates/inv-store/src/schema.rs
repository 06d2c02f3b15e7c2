use rusqlite::Connection;
use tracing::debug;

use crate::error::{Result, StoreError};

/// Current `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS inventario (
    ID_Movimiento   TEXT PRIMARY KEY,
    Fecha           TEXT,
    Nombre_Producto TEXT,
    Categoria       TEXT,
    Tipo_Movimiento TEXT,
    Cantidad        INTEGER,
    Precio_Unitario REAL,
    Vendedor        TEXT
);

CREATE INDEX IF NOT EXISTS idx_inventario_fecha ON inventario(Fecha);

CREATE TABLE IF NOT EXISTS ingest_runs (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    source       TEXT NOT NULL,
    sha256       TEXT NOT NULL,
    rows_read    INTEGER NOT NULL,
    rows_written INTEGER NOT NULL,
    rows_skipped INTEGER NOT NULL,
    mode         TEXT NOT NULL,
    ingested_at  TEXT NOT NULL   -- RFC3339 UTC
);
"#;

/// Create missing tables and stamp the schema version.
///
/// Databases without a version stamp (including ones holding only an
/// `inventario` table) are brought up to the current version.
pub(crate) fn migrate(conn: &Connection) -> Result<()> {
    let found: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if found > SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchema {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    conn.execute_batch(CREATE_TABLES)?;
    if found < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        debug!(from = found, to = SCHEMA_VERSION, "migrated schema");
    }
    Ok(())
}
