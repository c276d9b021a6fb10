//! Unit tests for the database layer (connection + migrations) and the
//! SQLite-backed key-value store.

use destiny_dice::database::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};
use destiny_dice::database::Database;
use destiny_dice::storage::{KeyValueStore, SqliteStore};

#[test]
fn test_open_in_memory_succeeds() {
    assert!(Database::open_in_memory().is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_local_storage_table() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let exists: bool = db
        .connection()
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='local_storage'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);
    assert!(exists, "Table 'local_storage' should exist after migrations");
}

#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_reopen_file_database_keeps_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dice.db");

    {
        let store = SqliteStore::new(Database::open(&path).unwrap());
        store.set_item("destinies", "[]").unwrap();
        store.set_item("historySize", "10").unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
    let store = SqliteStore::new(db);
    assert_eq!(store.get_item("historySize").unwrap().as_deref(), Some("10"));
    assert_eq!(store.get_item("destinies").unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_set_item_overwrites_whole_value() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set_item("k", "first").unwrap();
    store.set_item("k", "second").unwrap();
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("second"));

    let rows: i64 = store
        .database()
        .connection()
        .query_row("SELECT COUNT(*) FROM local_storage", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn test_remove_item_and_missing_key() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.get_item("absent").unwrap(), None);
    store.set_item("k", "v").unwrap();
    store.remove_item("k").unwrap();
    store.remove_item("k").unwrap();
    assert_eq!(store.get_item("k").unwrap(), None);
}
