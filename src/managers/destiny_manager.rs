//! Destiny Manager.
//!
//! Implements `DestinyManagerTrait`: adding, editing and removing destinies,
//! rolling one at random and keeping the bounded selection history. Every
//! mutation is persisted through [`DestinyStore`].

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};
use uuid::Uuid;

use crate::events::{StoreEvent, Subscription};
use crate::storage::DestinyStore;
use crate::types::destiny::{Destiny, HistoryItem, HistorySize, MAX_STORED_HISTORY};
use crate::types::errors::DestinyError;

/// Trait defining destiny management operations.
pub trait DestinyManagerTrait {
    fn add_destiny(&mut self, text: &str) -> Result<Destiny, DestinyError>;
    fn edit_destiny(&mut self, id: &str, text: &str) -> Result<Destiny, DestinyError>;
    fn remove_destiny(&mut self, id: &str) -> bool;
    fn select_random(&mut self) -> Result<HistoryItem, DestinyError>;
    fn set_history_size(&mut self, size: u32) -> Result<(), DestinyError>;
    /// Destinies ordered by creation time, newest first.
    fn destinies(&self) -> Vec<&Destiny>;
    fn history(&self) -> &[HistoryItem];
    fn visible_history(&self) -> &[HistoryItem];
    fn current_selection(&self) -> Option<&HistoryItem>;
    fn history_size(&self) -> HistorySize;
}

/// Selection engine holding the in-memory destinies and history.
pub struct DestinyManager {
    store: DestinyStore,
    subscription: Subscription,
    destinies: Vec<Destiny>,
    history: Vec<HistoryItem>,
    history_size: HistorySize,
    current: Option<HistoryItem>,
    rng: Box<dyn RngCore + Send>,
}

impl DestinyManager {
    /// Loads all records from `store` using an entropy-seeded RNG.
    pub fn open(store: DestinyStore) -> Self {
        Self::with_rng(store, Box::new(StdRng::from_entropy()))
    }

    /// Loads all records from `store`, drawing selections from `rng`.
    pub fn with_rng(store: DestinyStore, rng: Box<dyn RngCore + Send>) -> Self {
        let subscription = store.subscribe();
        let destinies = store.load_destinies();
        let history = store.load_history();
        let history_size = store.load_history_size();
        let current = history.first().cloned();
        debug!(
            destinies = destinies.len(),
            history = history.len(),
            history_size = history_size.get(),
            "destiny manager loaded"
        );
        Self {
            store,
            subscription,
            destinies,
            history,
            history_size,
            current,
            rng,
        }
    }

    /// Returns the current UNIX timestamp in milliseconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    /// Whether a roll is possible right now.
    pub fn can_select(&self) -> bool {
        !self.destinies.is_empty()
    }

    pub fn get_destiny(&self, id: &str) -> Option<&Destiny> {
        self.destinies.iter().find(|d| d.id == id)
    }

    /// Reloads destinies from the store if another writer announced a change.
    /// Returns whether a reload happened.
    pub fn sync(&mut self) -> bool {
        let changed = self
            .subscription
            .drain()
            .contains(&StoreEvent::ItemsUpdated);
        if changed {
            self.destinies = self.store.load_destinies();
        }
        changed
    }

    /// Re-reads every record from the store, discarding in-memory state.
    pub fn reload(&mut self) {
        self.subscription.drain();
        self.destinies = self.store.load_destinies();
        self.history = self.store.load_history();
        self.history_size = self.store.load_history_size();
    }
}

impl DestinyManagerTrait for DestinyManager {
    /// Adds a destiny. Text is trimmed; empty text and case-insensitive
    /// duplicates are rejected.
    fn add_destiny(&mut self, text: &str) -> Result<Destiny, DestinyError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DestinyError::EmptyText);
        }

        let lowered = trimmed.to_lowercase();
        if let Some(existing) = self
            .destinies
            .iter()
            .find(|d| d.text.to_lowercase() == lowered)
        {
            return Err(DestinyError::Duplicate(existing.text.clone()));
        }

        let destiny = Destiny {
            id: Uuid::new_v4().to_string(),
            text: trimmed.to_string(),
            created_at: Self::now(),
            edited_at: None,
        };
        self.destinies.push(destiny.clone());
        self.store.save_destinies(&self.destinies);
        info!(id = %destiny.id, "destiny added");
        Ok(destiny)
    }

    /// Replaces the text of an existing destiny and stamps `edited_at`.
    ///
    /// Edits are not checked against other destinies' text.
    fn edit_destiny(&mut self, id: &str, text: &str) -> Result<Destiny, DestinyError> {
        let trimmed = text.trim();
        let index = self
            .destinies
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| DestinyError::NotFound(id.to_string()))?;
        if trimmed.is_empty() {
            return Err(DestinyError::EmptyText);
        }

        let destiny = &mut self.destinies[index];
        destiny.text = trimmed.to_string();
        destiny.edited_at = Some(Self::now().max(destiny.created_at));
        let edited = destiny.clone();

        self.store.save_destinies(&self.destinies);
        info!(id, "destiny edited");
        Ok(edited)
    }

    /// Removes a destiny. Unknown IDs are ignored. History is left as is.
    fn remove_destiny(&mut self, id: &str) -> bool {
        let before = self.destinies.len();
        self.destinies.retain(|d| d.id != id);
        if self.destinies.len() == before {
            debug!(id, "remove ignored, destiny not found");
            return false;
        }
        self.store.save_destinies(&self.destinies);
        info!(id, "destiny removed");
        true
    }

    /// Picks one destiny uniformly at random and records it at the head of
    /// the history, evicting the oldest entries beyond the storage cap.
    fn select_random(&mut self) -> Result<HistoryItem, DestinyError> {
        let picked = self
            .destinies
            .choose(self.rng.as_mut())
            .ok_or(DestinyError::NoDestinies)?;

        let entry = HistoryItem::new(picked, Self::now());
        self.history.insert(0, entry.clone());
        self.history.truncate(MAX_STORED_HISTORY);
        self.current = Some(entry.clone());

        self.store.save_history(&self.history);
        info!(id = %entry.destiny.id, "destiny selected");
        Ok(entry)
    }

    /// Sets how many history entries are shown and persists the preference.
    ///
    /// Stored history longer than the new size is truncated for good.
    fn set_history_size(&mut self, size: u32) -> Result<(), DestinyError> {
        let size = HistorySize::try_from(size)?;
        self.history_size = size;
        self.store.save_history_size(size);

        if self.history.len() > size.get() {
            self.history.truncate(size.get());
            self.store.save_history(&self.history);
            debug!(history_size = size.get(), "stored history truncated");
        }
        Ok(())
    }

    fn destinies(&self) -> Vec<&Destiny> {
        let mut sorted: Vec<&Destiny> = self.destinies.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted
    }

    fn history(&self) -> &[HistoryItem] {
        &self.history
    }

    fn visible_history(&self) -> &[HistoryItem] {
        let end = self.history.len().min(self.history_size.get());
        &self.history[..end]
    }

    fn current_selection(&self) -> Option<&HistoryItem> {
        self.current.as_ref()
    }

    fn history_size(&self) -> HistorySize {
        self.history_size
    }
}
