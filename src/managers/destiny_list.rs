//! Read-only list of all destinies.
//!
//! Mirrors the destinies record and reloads it whenever the store announces
//! that the record was overwritten.

use crate::events::{StoreEvent, Subscription};
use crate::storage::DestinyStore;
use crate::types::destiny::{Destiny, TimestampLabel};

/// One rendered row of the destiny list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinyRow {
    pub id: String,
    pub text: String,
    pub label: TimestampLabel,
}

pub struct DestinyList {
    store: DestinyStore,
    subscription: Subscription,
    destinies: Vec<Destiny>,
}

impl DestinyList {
    pub fn open(store: DestinyStore) -> Self {
        let subscription = store.subscribe();
        let mut list = Self {
            store,
            subscription,
            destinies: Vec::new(),
        };
        list.load();
        list
    }

    fn load(&mut self) {
        let mut destinies = self.store.load_destinies();
        destinies.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.destinies = destinies;
    }

    /// Reloads when an `ItemsUpdated` event is pending. Returns whether it did.
    pub fn refresh_if_changed(&mut self) -> bool {
        let changed = self
            .subscription
            .drain()
            .contains(&StoreEvent::ItemsUpdated);
        if changed {
            self.load();
        }
        changed
    }

    /// Destinies newest-created first.
    pub fn destinies(&self) -> &[Destiny] {
        &self.destinies
    }

    pub fn rows(&self) -> Vec<DestinyRow> {
        self.destinies
            .iter()
            .map(|d| DestinyRow {
                id: d.id.clone(),
                text: d.text.clone(),
                label: d.timestamp_label(),
            })
            .collect()
    }

    pub fn total(&self) -> usize {
        self.destinies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinies.is_empty()
    }
}
