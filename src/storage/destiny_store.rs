//! Store adapter for the destiny records.
//!
//! Centralizes (de)serialization of the three records kept in the key-value
//! store. Reads never fail: a record that is absent, malformed or unreadable
//! comes back empty (or as the default history size). Writes never fail
//! either: errors are logged and dropped, leaving the previous record intact.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::KeyValueStore;
use crate::events::{EventBus, StoreEvent, Subscription};
use crate::types::destiny::{storage_keys, Destiny, HistoryItem, HistorySize};
use crate::types::errors::StorageError;

/// Shared handle to the destiny records and their change notifications.
#[derive(Clone)]
pub struct DestinyStore {
    store: Arc<dyn KeyValueStore>,
    bus: Arc<EventBus>,
}

impl DestinyStore {
    pub fn new(store: Arc<dyn KeyValueStore>, bus: Arc<EventBus>) -> Self {
        Self { store, bus }
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn subscribe(&self) -> Subscription {
        self.bus.subscribe()
    }

    pub fn load_destinies(&self) -> Vec<Destiny> {
        self.read_list(storage_keys::DESTINIES)
    }

    /// Overwrites the destinies record and notifies subscribers on success.
    pub fn save_destinies(&self, destinies: &[Destiny]) {
        if self.write_json(storage_keys::DESTINIES, destinies) {
            self.bus.publish(StoreEvent::ItemsUpdated);
        }
    }

    pub fn load_history(&self) -> Vec<HistoryItem> {
        self.read_list(storage_keys::SELECTION_HISTORY)
    }

    pub fn save_history(&self, history: &[HistoryItem]) {
        self.write_json(storage_keys::SELECTION_HISTORY, history);
    }

    pub fn load_history_size(&self) -> HistorySize {
        let raw = match self.store.get_item(storage_keys::HISTORY_SIZE) {
            Ok(Some(raw)) => raw,
            Ok(None) => return HistorySize::default(),
            Err(e) => {
                error!(key = storage_keys::HISTORY_SIZE, "error loading history size: {}", e);
                return HistorySize::default();
            }
        };
        match raw.trim().parse::<u32>().ok().map(HistorySize::try_from) {
            Some(Ok(size)) => size,
            _ => {
                warn!(value = %raw, "stored history size is not an allowed value, using default");
                HistorySize::default()
            }
        }
    }

    pub fn save_history_size(&self, size: HistorySize) {
        if let Err(e) = self
            .store
            .set_item(storage_keys::HISTORY_SIZE, &size.to_string())
        {
            error!(key = storage_keys::HISTORY_SIZE, "error saving history size: {}", e);
        }
    }

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.try_read(key) {
            Ok(list) => list,
            Err(e) => {
                error!(key, "error loading record: {}", e);
                Vec::new()
            }
        }
    }

    fn try_read<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        match self.store.get_item(key)? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Vec::new()),
        }
    }

    /// Returns whether the record was written.
    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set_item(key, &json));
        match result {
            Ok(()) => {
                debug!(key, "record saved");
                true
            }
            Err(e) => {
                error!(key, "error saving record: {}", e);
                false
            }
        }
    }
}
