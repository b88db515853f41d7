use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};
use std::fs;
use std::path::Path;

pub const SESSIONS_TABLE: &str = "activitysessions";

/// Ensure that the internal `log` table exists.
pub fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
pub fn table_exists(conn: &Connection, name: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Run the schema file against the database.
///
/// The schema is executed as a single batch; with `CREATE TABLE IF NOT
/// EXISTS` statements a second run leaves existing rows alone.
pub fn apply_schema(conn: &Connection, schema_path: &str) -> AppResult<()> {
    let sql = fs::read_to_string(Path::new(schema_path)).map_err(|e| {
        AppError::Schema(format!("cannot read schema file {}: {}", schema_path, e))
    })?;

    if sql.trim().is_empty() {
        return Err(AppError::Schema(format!(
            "schema file {} is empty",
            schema_path
        )));
    }

    conn.execute_batch(&sql)
        .map_err(|e| AppError::Schema(format!("{}: {}", schema_path, e)))?;

    if !table_exists(conn, SESSIONS_TABLE)? {
        return Err(AppError::Schema(format!(
            "{} does not create the `{}` table",
            schema_path, SESSIONS_TABLE
        )));
    }

    Ok(())
}

/// Initialize the database: schema file first, then the internal tables.
pub fn init_db(conn: &Connection, schema_path: &str) -> AppResult<()> {
    apply_schema(conn, schema_path)?;
    ensure_log_table(conn)?;
    Ok(())
}
