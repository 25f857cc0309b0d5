//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with its value and expiry metadata.
///
/// Nothing here is serialized, so timestamps use the monotonic clock
/// rather than wall time.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry was written
    pub stored_at: Instant,
    /// Duration after which the entry is considered stale
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry timestamped now.
    ///
    /// A zero TTL is accepted and makes the entry immediately expired:
    /// it is stored, then purged on first access or sweep. `set` never
    /// rejects a malformed TTL.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is valid iff `now - stored_at <= ttl`; a zero TTL is
    /// expired from the moment it is stored.
    pub fn is_expired(&self) -> bool {
        self.ttl.is_zero() || self.stored_at.elapsed() > self.ttl
    }

    // == Time To Live ==
    /// Returns the remaining TTL, saturating at zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        if self.ttl.is_zero() {
            return Duration::ZERO;
        }
        self.ttl.saturating_sub(self.stored_at.elapsed())
    }
}
