//! Database migrations

use rusqlite::Connection;

use super::kv_store::KeyValueStore;
use crate::error::Result;
use crate::models::bool_str;
use crate::repository::ASSIGNMENTS_KEY;

/// Current schema version
const CURRENT_VERSION: i32 = 1;

/// Flag recording that pre-release assignments were cleared
pub const MIGRATION_V1_FLAG: &str = "migration_v1_complete";

/// Run all pending schema migrations
pub fn run(conn: &Connection) -> Result<()> {
    let version = get_version(conn)?;

    if version < 1 {
        migrate_v1(conn)?;
    }

    Ok(())
}

/// Get the current schema version
fn get_version(conn: &Connection) -> Result<i32> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get::<_, i32>(0).map(|value| value != 0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Migration to version 1: key-value table
fn migrate_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );
        CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        );
        INSERT INTO schema_version (version) VALUES (1);
        COMMIT;",
    )?;
    tracing::debug!("Migrated database schema to version {CURRENT_VERSION}");
    Ok(())
}

/// One-time data migrations applied at application startup
///
/// Assignments written before the first release referenced ids that no longer
/// exist, so they are dropped once. Returns `true` if anything ran.
pub fn run_app_migrations(store: &impl KeyValueStore) -> Result<bool> {
    if store.get(MIGRATION_V1_FLAG)?.is_some() {
        return Ok(false);
    }

    store.remove(ASSIGNMENTS_KEY)?;
    store.set(MIGRATION_V1_FLAG, bool_str(true))?;
    tracing::info!("Cleared legacy affirmation assignments");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, MemoryStore};

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_fresh_connection_has_version_zero() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_version(&conn).unwrap(), 0);
    }

    #[test]
    fn test_app_migration_clears_assignments_once() {
        let store = MemoryStore::new();
        store.set(ASSIGNMENTS_KEY, r#"{"2024-06-01":"a1"}"#).unwrap();

        assert!(run_app_migrations(&store).unwrap());
        assert_eq!(store.get(ASSIGNMENTS_KEY).unwrap(), None);
        assert_eq!(store.get_bool(MIGRATION_V1_FLAG).unwrap(), Some(true));

        store.set(ASSIGNMENTS_KEY, r#"{"2024-06-01":"3"}"#).unwrap();
        assert!(!run_app_migrations(&store).unwrap());
        assert!(store.get(ASSIGNMENTS_KEY).unwrap().is_some());
    }

    #[test]
    fn test_app_migration_on_database() {
        let db = Database::open_in_memory().unwrap();
        assert!(run_app_migrations(&db).unwrap());
        assert!(!run_app_migrations(&db).unwrap());
    }
}
