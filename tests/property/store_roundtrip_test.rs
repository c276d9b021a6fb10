//! Property-based tests for persisting records through the SQLite store.

use std::sync::Arc;

use destiny_dice::events::EventBus;
use destiny_dice::storage::{DestinyStore, SqliteStore};
use destiny_dice::types::destiny::{Destiny, HistoryItem};
use proptest::prelude::*;

fn arb_destiny() -> impl Strategy<Value = Destiny> {
    (
        "[a-f0-9]{8}",
        "\\PC{1,40}",
        0i64..4_102_444_800_000,
        proptest::option::of(0i64..1_000_000),
    )
        .prop_map(|(id, text, created_at, edit_delay)| Destiny {
            id,
            text,
            created_at,
            edited_at: edit_delay.map(|d| created_at + d),
        })
}

fn sqlite_store() -> DestinyStore {
    let kv = SqliteStore::open_in_memory().expect("Failed to open in-memory store");
    DestinyStore::new(Arc::new(kv), Arc::new(EventBus::new()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(25))]

    #[test]
    fn destinies_roundtrip(destinies in proptest::collection::vec(arb_destiny(), 0..10)) {
        let store = sqlite_store();
        store.save_destinies(&destinies);
        prop_assert_eq!(store.load_destinies(), destinies);
    }

    #[test]
    fn history_roundtrip(
        entries in proptest::collection::vec((arb_destiny(), 0i64..1_000_000), 0..20)
    ) {
        let history: Vec<HistoryItem> = entries
            .iter()
            .map(|(d, delay)| HistoryItem::new(d, d.created_at + delay))
            .collect();
        let store = sqlite_store();
        store.save_history(&history);
        prop_assert_eq!(store.load_history(), history);
    }
}
