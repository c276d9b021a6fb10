//! App Core for Destiny Dice.
//!
//! Wires the database, key-value store, event bus and selection engine
//! together, and resolves where the database lives.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::database::Database;
use crate::events::{EventBus, Subscription};
use crate::managers::destiny_list::DestinyList;
use crate::managers::destiny_manager::DestinyManager;
use crate::platform;
use crate::storage::{DestinyStore, KeyValueStore, SqliteStore};
use crate::types::settings::AppSettings;

/// Environment variable naming the directory that holds the database.
pub const DATA_DIR_ENV: &str = "DESTINY_DICE_DATA_DIR";

/// File name of the database inside the data directory.
pub const DATABASE_FILE: &str = "destiny-dice.db";

/// Central application struct: one store, one bus, one selection engine.
///
/// List views are created on demand with [`App::list_view`]; each gets its
/// own subscription to the bus.
pub struct App {
    pub store: DestinyStore,
    pub manager: DestinyManager,
}

impl App {
    /// Opens (creating if needed) the database at `db_path` and loads all records.
    pub fn new(db_path: &Path) -> Result<Self, Box<dyn Error>> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create data directory {}: {}", parent.display(), e))?;
            }
        }
        let db = Database::open(db_path)?;
        tracing::debug!(path = %db_path.display(), "database opened");
        Ok(Self::with_store(Arc::new(SqliteStore::new(db))))
    }

    /// App over a throwaway in-memory SQLite database.
    pub fn open_in_memory() -> Result<Self, Box<dyn Error>> {
        Ok(Self::with_store(Arc::new(SqliteStore::open_in_memory()?)))
    }

    /// App over any key-value store.
    pub fn with_store(kv: Arc<dyn KeyValueStore>) -> Self {
        let store = DestinyStore::new(kv, Arc::new(EventBus::new()));
        let manager = DestinyManager::open(store.clone());
        Self { store, manager }
    }

    pub fn list_view(&self) -> DestinyList {
        DestinyList::open(self.store.clone())
    }

    pub fn subscribe(&self) -> Subscription {
        self.store.subscribe()
    }
}

/// Picks the database file: explicit path, then `$DESTINY_DICE_DATA_DIR`,
/// then the configured path, then the platform data directory.
pub fn resolve_database_path(explicit: Option<PathBuf>, settings: &AppSettings) -> PathBuf {
    let env_dir = std::env::var(DATA_DIR_ENV).ok().filter(|d| !d.is_empty());
    choose_database_path(explicit, env_dir, settings)
}

fn choose_database_path(
    explicit: Option<PathBuf>,
    env_dir: Option<String>,
    settings: &AppSettings,
) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    if let Some(dir) = env_dir {
        return PathBuf::from(dir).join(DATABASE_FILE);
    }
    if let Some(path) = &settings.storage.database_path {
        return PathBuf::from(path);
    }
    platform::get_data_dir().join(DATABASE_FILE)
}
