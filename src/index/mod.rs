//! Card Metadata Index Module
//!
//! Package-scoped lookup maps over bulk JSON card documents, with
//! single-flight loading, debounced invalidation and filename decoding.

mod decode;
mod fetch;
mod lookup;
mod registry;
mod tables;

// Re-export public types
pub use decode::{FILENAME_DELIMITER, MIN_FILENAME_SEGMENTS};
pub use fetch::{BulkDocumentFetcher, DocumentKind};
pub use lookup::{build_name_table, build_regular_lookup, build_special_lookup};
pub use registry::CardMetadataIndex;
pub use tables::ClassificationTables;
