//! Card Cache - in-memory caching core for a trading-card catalog
//!
//! Two independent leaf components, composed by the host's route handlers:
//!
//! - [`cache::ResponseCache`]: a generic key→value store with per-entry TTL,
//!   lazy expiry, and FIFO-on-capacity eviction, for memoizing expensive
//!   listing and query responses. Pair it with
//!   [`tasks::spawn_sweep_task`] so entries written once and never re-read
//!   still get purged.
//! - [`index::CardMetadataIndex`]: package-scoped lookup maps built from
//!   bulk JSON card documents, with single-flight loading, debounced
//!   invalidation after bulk writes, and decoding of raw image filenames
//!   into structured card records.
//!
//! All state is in-memory and rebuilt from the external documents on demand;
//! nothing persists across process restarts.

pub mod cache;
pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod tasks;

pub use cache::{CacheStats, ResponseCache};
pub use config::Config;
pub use error::{CardCacheError, Result};
pub use index::{BulkDocumentFetcher, CardMetadataIndex, ClassificationTables, DocumentKind};
pub use models::{DecodedCard, IndexStatus, PackageLookup};
pub use tasks::spawn_sweep_task;
