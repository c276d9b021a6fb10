//! Property-based tests for adding destinies.
//!
//! Distinct texts are all accepted with distinct IDs, and any re-casing or
//! re-padding of an existing text is rejected as a duplicate.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use destiny_dice::app::App;
use destiny_dice::managers::destiny_manager::DestinyManagerTrait;
use destiny_dice::storage::MemoryStore;
use destiny_dice::types::errors::DestinyError;
use proptest::prelude::*;

/// Sets of texts that stay distinct after lowercasing.
fn arb_texts() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set("[a-z][a-z0-9 ]{0,20}[a-z0-9]", 1..15)
        .prop_map(|set: BTreeSet<String>| set.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn distinct_adds_are_all_kept(texts in arb_texts()) {
        let mut app = App::with_store(Arc::new(MemoryStore::new()));
        for text in &texts {
            app.manager.add_destiny(text).expect("distinct text should be accepted");
        }

        let destinies = app.manager.destinies();
        prop_assert_eq!(destinies.len(), texts.len());
        let ids: HashSet<&str> = destinies.iter().map(|d| d.id.as_str()).collect();
        prop_assert_eq!(ids.len(), texts.len());
        for pair in destinies.windows(2) {
            prop_assert!(pair[0].created_at >= pair[1].created_at);
        }
        prop_assert_eq!(app.store.load_destinies().len(), texts.len());
    }

    #[test]
    fn recased_text_is_a_duplicate(
        text in "[a-z][a-z ]{0,20}[a-z]",
        upper_mask in proptest::collection::vec(any::<bool>(), 22),
        pad in 0usize..4,
    ) {
        let mut app = App::with_store(Arc::new(MemoryStore::new()));
        let stored = app.manager.add_destiny(&text).unwrap();

        let recased: String = text
            .chars()
            .zip(upper_mask.iter().cycle())
            .map(|(c, &up)| if up { c.to_ascii_uppercase() } else { c })
            .collect();
        let padded = format!("{}{}{}", " ".repeat(pad), recased, "\t".repeat(pad));

        let result = app.manager.add_destiny(&padded);
        prop_assert_eq!(result, Err(DestinyError::Duplicate(stored.text)));
        prop_assert_eq!(app.manager.destinies().len(), 1);
    }
}
