//! Write Order Module
//!
//! Tracks key insertion order for FIFO-on-capacity eviction.

use std::collections::VecDeque;

// == Write Order Tracker ==
/// Tracks the order keys were written in.
///
/// Keys are stored in a VecDeque where:
/// - Front = oldest write
/// - Back = newest write
///
/// Unlike an LRU tracker, reads never reorder anything: eviction is FIFO by
/// write time only. Overwriting a key re-records it at the back, matching
/// the refreshed `stored_at` of the overwritten entry.
#[derive(Debug, Default)]
pub struct WriteOrder {
    /// Keys ordered by write time
    order: VecDeque<String>,
}

impl WriteOrder {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record ==
    /// Records a write for a key (moves it to the back).
    pub fn record(&mut self, key: &str) {
        self.remove(key);
        self.order.push_back(key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker. No-op if absent.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Pop Oldest ==
    /// Returns and removes the oldest-written key.
    ///
    /// Returns None if the tracker is empty.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    // == Peek Oldest ==
    /// Returns the oldest-written key without removing it.
    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.front()
    }

    // == Clear ==
    /// Removes all tracked keys.
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    #[allow(dead_code)]
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
