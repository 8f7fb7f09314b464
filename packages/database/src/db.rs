//! Database connection utilities.

use std::path::Path;

use rusqlite::Connection;

use crate::DbError;

/// Default on-disk location of the quake map database.
pub const DEFAULT_DB_PATH: &str = "data/quake_map.db";

/// Opens (or creates) the earthquake database at `path` and applies the
/// schema.
///
/// # Errors
///
/// Returns [`DbError`] if the parent directory cannot be created, the
/// connection fails, or the schema cannot be applied.
pub fn open(path: &Path) -> Result<Connection, DbError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path)?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Opens an in-memory database with the schema applied, for tests.
///
/// # Errors
///
/// Returns [`DbError`] if the connection or schema creation fails.
pub fn open_in_memory() -> Result<Connection, DbError> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Opens the database at the path from the `DATABASE_PATH` environment
/// variable, falling back to [`DEFAULT_DB_PATH`].
///
/// # Errors
///
/// Returns [`DbError`] if the database cannot be opened.
pub fn connect_from_env() -> Result<Connection, DbError> {
    let path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    open(Path::new(&path))
}

/// The `UNIQUE` constraint on `earthquake_id` is the second line of defense
/// against duplicate ingestion: the cutoff scan avoids duplicates only for
/// an in-order feed, the constraint rejects them unconditionally.
///
/// `time` holds RFC 3339 UTC text in a fixed millisecond rendering, so the
/// lexicographic index order is chronological.
fn create_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS earthquakes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            earthquake_id TEXT NOT NULL UNIQUE,
            time TEXT NOT NULL,
            depth REAL NOT NULL DEFAULT 0,
            magnitude REAL NOT NULL DEFAULT 0,
            latitude REAL NOT NULL DEFAULT 0,
            longitude REAL NOT NULL DEFAULT 0,
            country TEXT,
            place TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_earthquakes_time
            ON earthquakes(time DESC);
        CREATE INDEX IF NOT EXISTS idx_earthquakes_magnitude
            ON earthquakes(magnitude DESC);",
    )?;
    Ok(())
}
