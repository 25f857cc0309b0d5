//! Error types for the metadata core
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Card Cache Error Enum ==
/// Unified error type for the metadata lookup core.
///
/// A cache miss is not an error: `ResponseCache::get` returns `Option::None`
/// and lookup misses inside decoding resolve to documented defaults. Only the
/// two genuinely distinguishable failure kinds surface here, so hosts can map
/// them to "not found" and "bad request" responses respectively.
///
/// The enum is `Clone` because a failed single-flight build is broadcast to
/// every waiter that coalesced onto it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardCacheError {
    /// The package's regular card-definition document could not be fetched
    /// or parsed. Fatal for decoding against that package until a later
    /// request retries the fetch.
    #[error("Card metadata not found for package: {0}")]
    MetadataNotFound(String),

    /// The caller supplied an image filename with too few segments to
    /// decode. A contract violation, not a transient condition.
    #[error("Invalid card filename format: {0}")]
    InvalidFilenameFormat(String),
}

// == Result Type Alias ==
/// Convenience Result type for the metadata lookup core.
pub type Result<T> = std::result::Result<T, CardCacheError>;
