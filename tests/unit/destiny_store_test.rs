//! Unit tests for the destiny store adapter: fallbacks on bad records,
//! swallowed write failures and change notifications.

use std::sync::Arc;

use destiny_dice::events::{EventBus, StoreEvent};
use destiny_dice::storage::{DestinyStore, KeyValueStore, MemoryStore};
use destiny_dice::types::destiny::{storage_keys, Destiny, HistoryItem, HistorySize};
use rstest::rstest;

fn setup() -> (Arc<MemoryStore>, DestinyStore) {
    let kv = Arc::new(MemoryStore::new());
    let store = DestinyStore::new(kv.clone(), Arc::new(EventBus::new()));
    (kv, store)
}

fn destiny(id: &str, text: &str, created_at: i64) -> Destiny {
    Destiny {
        id: id.to_string(),
        text: text.to_string(),
        created_at,
        edited_at: None,
    }
}

#[test]
fn test_absent_records_load_empty() {
    let (_kv, store) = setup();
    assert!(store.load_destinies().is_empty());
    assert!(store.load_history().is_empty());
    assert_eq!(store.load_history_size(), HistorySize::DEFAULT);
}

#[test]
fn test_malformed_records_load_empty() {
    let (kv, store) = setup();
    kv.set_item(storage_keys::DESTINIES, "{ not json").unwrap();
    kv.set_item(storage_keys::SELECTION_HISTORY, r#"{"id":"x"}"#).unwrap();
    assert!(store.load_destinies().is_empty());
    assert!(store.load_history().is_empty());
}

#[test]
fn test_read_failure_loads_empty() {
    let (kv, store) = setup();
    store.save_destinies(&[destiny("a", "Read a book", 1)]);
    kv.set_fail_reads(true);
    assert!(store.load_destinies().is_empty());
    assert_eq!(store.load_history_size(), HistorySize::DEFAULT);
    kv.set_fail_reads(false);
    assert_eq!(store.load_destinies().len(), 1);
}

#[test]
fn test_save_destinies_writes_camel_case_json() {
    let (kv, store) = setup();
    store.save_destinies(&[destiny("a", "Go to the beach", 1700000000000)]);
    let raw = kv.raw(storage_keys::DESTINIES).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["id"], "a");
    assert_eq!(value[0]["text"], "Go to the beach");
    assert_eq!(value[0]["createdAt"], 1700000000000i64);
    assert!(value[0].get("editedAt").is_none());
}

#[test]
fn test_save_destinies_notifies_subscribers() {
    let (_kv, store) = setup();
    let sub = store.subscribe();
    store.save_destinies(&[destiny("a", "Read a book", 1)]);
    assert_eq!(sub.drain(), vec![StoreEvent::ItemsUpdated]);
}

#[test]
fn test_save_history_does_not_notify() {
    let (_kv, store) = setup();
    let sub = store.subscribe();
    let d = destiny("a", "Read a book", 1);
    store.save_history(&[HistoryItem::new(&d, 2)]);
    store.save_history_size(HistorySize::try_from(10).unwrap());
    assert!(sub.drain().is_empty());
}

#[test]
fn test_write_failure_is_swallowed_and_keeps_previous_record() {
    let (kv, store) = setup();
    store.save_destinies(&[destiny("a", "Read a book", 1)]);
    let sub = store.subscribe();

    kv.set_fail_writes(true);
    store.save_destinies(&[destiny("b", "Go hiking", 2)]);
    store.save_history_size(HistorySize::try_from(20).unwrap());

    assert!(sub.drain().is_empty(), "failed write must not notify");
    let loaded = store.load_destinies();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "a");
    assert_eq!(store.load_history_size(), HistorySize::DEFAULT);
}

#[test]
fn test_history_roundtrip_keeps_snapshot_fields() {
    let (kv, store) = setup();
    let d = Destiny {
        edited_at: Some(5),
        ..destiny("a", "Read a book", 1)
    };
    let history = vec![HistoryItem::new(&d, 9)];
    store.save_history(&history);
    assert_eq!(store.load_history(), history);

    let raw = kv.raw(storage_keys::SELECTION_HISTORY).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["selectedAt"], 9);
    assert_eq!(value[0]["editedAt"], 5);
}

#[test]
fn test_history_size_persisted_as_decimal_string() {
    let (kv, store) = setup();
    store.save_history_size(HistorySize::try_from(15).unwrap());
    assert_eq!(kv.raw(storage_keys::HISTORY_SIZE).as_deref(), Some("15"));
    assert_eq!(u32::from(store.load_history_size()), 15);
}

#[rstest]
#[case("6")]
#[case("0")]
#[case("abc")]
#[case("")]
#[case("-5")]
fn test_invalid_history_size_falls_back_to_default(#[case] raw: &str) {
    let (kv, store) = setup();
    kv.set_item(storage_keys::HISTORY_SIZE, raw).unwrap();
    assert_eq!(store.load_history_size(), HistorySize::DEFAULT);
}

#[test]
fn test_clones_share_bus() {
    let (_kv, store) = setup();
    let other = store.clone();
    let sub = other.subscribe();
    store.save_destinies(&[]);
    assert_eq!(sub.drain(), vec![StoreEvent::ItemsUpdated]);
    assert!(Arc::ptr_eq(store.bus(), other.bus()));
}
