//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the cache's documented correctness properties.

use proptest::prelude::*;
use std::thread::sleep;
use std::time::Duration;

use crate::cache::ResponseCache;

// == Test Configuration ==
const TEST_CAPACITY: usize = 100;
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:]{1,64}".prop_map(|s| s)
}

/// Generates cache values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,256}".prop_map(|s| s)
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations, hit/miss statistics reflect exactly
    // the Get outcomes that occurred, and the entry count stays accurate.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = ResponseCache::new(TEST_CAPACITY);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key, value, TEST_TTL);
                }
                CacheOp::Get { key } => {
                    match store.get(&key) {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                }
                CacheOp::Delete { key } => {
                    store.delete(&key);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, store.len(), "Total entries mismatch");
    }

    // For any key-value pair, storing then retrieving before expiration
    // returns the exact value that was stored.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let mut store = ResponseCache::new(TEST_CAPACITY);

        store.set(key.clone(), value.clone(), TEST_TTL);

        let retrieved = store.get(&key);
        prop_assert_eq!(retrieved, Some(value), "Round-trip value mismatch");
    }

    // For any key that exists, after delete a subsequent get misses, and
    // deleting again is a harmless no-op.
    #[test]
    fn prop_delete_removes_entry(key in key_strategy(), value in value_strategy()) {
        let mut store = ResponseCache::new(TEST_CAPACITY);

        store.set(key.clone(), value, TEST_TTL);
        prop_assert!(store.get(&key).is_some(), "Key should exist before delete");

        prop_assert!(store.delete(&key), "Delete should report the key existed");
        prop_assert!(store.get(&key).is_none(), "Key should not exist after delete");

        prop_assert!(!store.delete(&key), "Second delete should be a no-op");
        prop_assert_eq!(store.len(), 0);
    }

    // For any key, storing V1 then V2 results in get returning V2, with a
    // single entry.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut store = ResponseCache::new(TEST_CAPACITY);

        store.set(key.clone(), value1, TEST_TTL);
        store.set(key.clone(), value2.clone(), TEST_TTL);

        prop_assert_eq!(store.get(&key), Some(value2), "Overwrite should return new value");
        prop_assert_eq!(store.len(), 1, "Should have exactly one entry after overwrite");
    }

    // For any sequence of set operations, the number of entries never
    // exceeds the capacity.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..200)
    ) {
        let capacity = 50;
        let mut store = ResponseCache::new(capacity);

        for (key, value) in entries {
            store.set(key, value, TEST_TTL);
            prop_assert!(
                store.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                store.len(),
                capacity
            );
        }
    }
}

// Property tests for FIFO eviction behavior
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For a cache filled to capacity, inserting a new key evicts exactly
    // the oldest-written key, regardless of which keys were read.
    #[test]
    fn prop_fifo_eviction_order(
        initial_keys in prop::collection::vec(key_strategy(), 3..10),
        read_index in 0usize..100,
        new_key in key_strategy(),
        new_value in value_strategy()
    ) {
        // Deduplicate keys to ensure unique entries
        let unique_keys: Vec<String> = initial_keys
            .into_iter()
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        prop_assume!(unique_keys.len() >= 2);
        prop_assume!(!unique_keys.contains(&new_key));

        let capacity = unique_keys.len();
        let mut store = ResponseCache::new(capacity);

        // Fill to capacity; the first key written is the eviction candidate
        let oldest_key = unique_keys[0].clone();
        for key in &unique_keys {
            store.set(key.clone(), format!("value_{}", key), TEST_TTL);
        }
        prop_assert_eq!(store.len(), capacity, "Cache should be at capacity");

        // Reads must not influence eviction order
        let read_key = &unique_keys[read_index % unique_keys.len()];
        let _ = store.get(read_key);

        store.set(new_key.clone(), new_value, TEST_TTL);

        prop_assert_eq!(store.len(), capacity, "Cache should remain at capacity");
        prop_assert!(
            store.get(&oldest_key).is_none(),
            "Oldest-written key '{}' should have been evicted",
            oldest_key
        );
        prop_assert!(store.get(&new_key).is_some(), "New key should exist");

        for key in unique_keys.iter().skip(1) {
            prop_assert!(
                store.get(key).is_some(),
                "Key '{}' should still exist (not the oldest write)",
                key
            );
        }
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // For any entry stored with a TTL, once the TTL elapses a get misses
    // and the key disappears from the listing.
    #[test]
    fn prop_ttl_expiration_behavior(key in key_strategy(), value in value_strategy()) {
        let mut store = ResponseCache::new(TEST_CAPACITY);

        store.set(key.clone(), value.clone(), Duration::from_millis(30));

        let before = store.get(&key);
        prop_assert_eq!(before, Some(value), "Entry should exist before TTL elapses");

        sleep(Duration::from_millis(60));

        prop_assert!(store.get(&key).is_none(), "Entry should miss after TTL elapses");
        prop_assert!(!store.keys().contains(&key), "Expired key should be purged");
    }
}
