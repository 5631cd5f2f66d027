//! SQLite schema for the key-value backend
//!
//! The version lives in `PRAGMA user_version`. Each entry of `MIGRATIONS`
//! moves the database up one version; opening a database applies whatever
//! it has not seen yet.

use rusqlite::{Connection, Result};

/// Steps indexed by the version they upgrade from
const MIGRATIONS: &[&str] = &[
    // 0 -> 1: string keys to whole string values
    r#"
    CREATE TABLE IF NOT EXISTS kv (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at INTEGER NOT NULL
    );
    "#,
];

/// Version a fully migrated database reports
pub const SCHEMA_VERSION: i32 = MIGRATIONS.len() as i32;

pub fn schema_version(conn: &Connection) -> Result<i32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Bring the database up to `SCHEMA_VERSION`
///
/// Returns the number of steps applied. Every step runs in the same
/// transaction as its version bump.
pub fn migrate(conn: &mut Connection) -> Result<usize> {
    let current = schema_version(conn)?.max(0) as usize;
    let pending = MIGRATIONS.iter().enumerate().skip(current);

    let mut applied = 0;
    for (from, sql) in pending {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", (from + 1) as i32)?;
        tx.commit()?;
        applied += 1;
    }

    if applied > 0 {
        tracing::debug!("Migrated board database to version {}", SCHEMA_VERSION);
    }
    Ok(applied)
}
