//! Key-value persistence.
//!
//! [`KeyValueStore`] is the storage handle every consumer receives; nothing in
//! the crate reaches for a global store. [`SqliteStore`] is the durable
//! implementation and [`MemoryStore`] the in-memory one used in tests.
//! [`DestinyStore`] layers the destiny records on top.

pub mod destiny_store;
pub mod memory_store;
pub mod sqlite_store;

pub use destiny_store::DestinyStore;
pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;

use crate::types::errors::StorageError;

/// String-keyed store of string values. Every write replaces the whole value.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
