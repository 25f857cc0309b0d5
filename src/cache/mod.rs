//! Cache Module
//!
//! Provides the generic in-memory response cache with TTL expiration and
//! FIFO-on-capacity eviction.

mod entry;
mod order;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use order::WriteOrder;
pub use stats::CacheStats;
pub use store::ResponseCache;
