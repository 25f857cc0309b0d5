//! Bulk Document Fetch Boundary
//!
//! The metadata index never touches the filesystem or object storage itself;
//! it asks an injected fetcher for parsed JSON. In the reference deployment
//! the documents live at `{base}/{package_code}[_special].json` plus one
//! global card-names document, but the index only needs "parsed JSON or
//! absent" back.

use serde_json::Value;

// == Document Kind ==
/// Which per-package bulk document to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// The regular card map: booster name → card type → [card IDs].
    /// Mandatory; absence is fatal for the package.
    Regular,
    /// The optional special card map: card ID or name → attribute overrides.
    Special,
}

impl DocumentKind {
    /// Filename suffix the reference deployment uses for this kind.
    pub fn suffix(&self) -> &'static str {
        match self {
            DocumentKind::Regular => "",
            DocumentKind::Special => "_special",
        }
    }
}

// == Bulk Document Fetcher ==
/// External boundary for loading bulk JSON documents.
///
/// `Ok(None)` is the not-found signal; `Err` covers transport and parse
/// failures. Timeouts and retries are the implementor's policy: the index
/// never retries on its own.
#[allow(async_fn_in_trait)]
pub trait BulkDocumentFetcher: Send + Sync + 'static {
    /// Fetches one per-package bulk document.
    async fn fetch_package_document(
        &self,
        package_code: &str,
        kind: DocumentKind,
    ) -> anyhow::Result<Option<Value>>;

    /// Fetches the global card-names document
    /// (name key → language code → display name).
    async fn fetch_card_names(&self) -> anyhow::Result<Value>;
}
