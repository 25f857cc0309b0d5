//! Response Cache Module
//!
//! Main cache engine combining HashMap storage with write-order tracking and
//! TTL expiration. Memoizes expensive idempotent reads (directory listings,
//! filtered queries) for a bounded time.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, WriteOrder};

// == Response Cache ==
/// Capacity-bounded key→value store with per-entry TTL and lazy expiry.
///
/// Eviction is FIFO by write time: when inserting a new key at capacity,
/// the entry with the oldest `stored_at` is evicted. Reads do not protect
/// an entry from eviction; the access pattern is dominated by high-locality
/// keys that repeat within minutes, so LRU bookkeeping isn't worth its cost.
///
/// None of the operations fail. A miss (absent or expired) is `None`, and a
/// zero TTL stores an immediately expired entry instead of rejecting.
#[derive(Debug)]
pub struct ResponseCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Write-order tracker for FIFO eviction
    order: WriteOrder,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of live entries
    capacity: usize,
}

impl<V: Clone> ResponseCache<V> {
    // == Constructor ==
    /// Creates a new ResponseCache with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: WriteOrder::new(),
            stats: CacheStats::new(),
            capacity,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value if present and not expired. An expired entry is
    /// purged and counted as a miss; no other side effects.
    pub fn get(&mut self, key: &str) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.entries.remove(key);
                self.order.remove(key);
                self.stats.record_expired(1);
                self.stats.record_miss();
                self.stats.set_total_entries(self.entries.len());
                return None;
            }

            let value = entry.value.clone();
            self.stats.record_hit();
            Some(value)
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Set ==
    /// Inserts or overwrites the entry for `key`, timestamped now.
    ///
    /// When inserting a new key at capacity, the single oldest-by-write-time
    /// entry is evicted first. Overwriting refreshes the entry's timestamp
    /// and write order without triggering eviction.
    pub fn set(&mut self, key: String, value: V, ttl: Duration) {
        // A zero-capacity cache stores nothing, keeping len() <= capacity
        if self.capacity == 0 {
            return;
        }

        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.capacity {
            if let Some(evicted_key) = self.order.pop_oldest() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, ttl));
        self.order.record(&key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Delete ==
    /// Removes an entry by key. Idempotent; returns whether one existed.
    pub fn delete(&mut self, key: &str) -> bool {
        let existed = self.entries.remove(key).is_some();
        if existed {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        existed
    }

    // == Clear ==
    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
    }

    // == Keys ==
    /// Returns the current live key strings.
    ///
    /// Purging is lazy, so the result may include keys whose TTL has
    /// elapsed but that haven't been touched since; the background sweep
    /// takes care of those.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed. Used by the background sweep
    /// so memory stays bounded even for keys written once and never re-read.
    pub fn purge_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.order.remove(&key);
        }

        self.stats.record_expired(count as u64);
        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Capacity ==
    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
