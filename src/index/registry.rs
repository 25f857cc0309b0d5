//! Card Metadata Index Registry
//!
//! Owns the per-package lookup cache: lazy single-flight builds, explicit
//! and timer-scheduled invalidation, and the lazily loaded global card-name
//! table.
//!
//! Per-package lifecycle: Unloaded -> Loading -> Ready -> (invalidate)
//! Unloaded. Loading is shared across concurrent callers; a regular-document
//! failure is broadcast to every waiter and the slot reverts to Unloaded, so
//! a later request retries from scratch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex, OnceCell};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{CardCacheError, Result};
use crate::index::fetch::{BulkDocumentFetcher, DocumentKind};
use crate::index::lookup::{build_name_table, build_regular_lookup, build_special_lookup};
use crate::index::tables::ClassificationTables;
use crate::models::{CardNameTable, IndexStatus, PackageLookup};

/// Outcome of one package build, broadcast to every coalesced waiter.
type BuildResult = Result<Arc<PackageLookup>>;

// == Package Slot ==
/// State of one package's lookup entry. Absence from the slot map is the
/// Unloaded state.
enum PackageSlot {
    /// A build is in flight; waiters subscribe to its result channel.
    Loading(watch::Receiver<Option<BuildResult>>),
    /// Lookup maps are built and shared.
    Ready(Arc<PackageLookup>),
}

/// What a `lookup_maps` call has to do after inspecting the slot map.
enum Role {
    /// This caller runs the build and broadcasts the result.
    Build(watch::Sender<Option<BuildResult>>),
    /// Another caller's build is in flight; await its broadcast.
    Wait(watch::Receiver<Option<BuildResult>>),
}

struct Inner<F> {
    fetcher: F,
    tables: ClassificationTables,
    /// package code → load state; absent means Unloaded
    slots: Mutex<HashMap<String, PackageSlot>>,
    /// package code → pending invalidation timer (one at most per package)
    timers: Mutex<HashMap<String, JoinHandle<()>>>,
    /// Global card-name table, loaded once on first use
    card_names: OnceCell<Arc<CardNameTable>>,
}

// == Card Metadata Index ==
/// Package-scoped card metadata index with single-flight loading and
/// invalidation-on-write semantics.
///
/// Cheap to clone (all state behind one `Arc`); the reference deployment
/// constructs it once at process start and hands clones to route handlers
/// and the write path.
pub struct CardMetadataIndex<F> {
    inner: Arc<Inner<F>>,
}

impl<F> Clone for CardMetadataIndex<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: BulkDocumentFetcher> CardMetadataIndex<F> {
    // == Constructor ==
    /// Creates a new index over the given fetcher and classification tables.
    pub fn new(fetcher: F, tables: ClassificationTables) -> Self {
        Self {
            inner: Arc::new(Inner {
                fetcher,
                tables,
                slots: Mutex::new(HashMap::new()),
                timers: Mutex::new(HashMap::new()),
                card_names: OnceCell::new(),
            }),
        }
    }

    /// The classification tables decoding consults.
    pub(crate) fn tables(&self) -> &ClassificationTables {
        &self.inner.tables
    }

    // == Lookup Maps ==
    /// Returns the composed lookup maps for a package, building them on
    /// first request.
    ///
    /// Concurrent calls for the same uncached package coalesce onto a single
    /// fetch (single-flight): the first caller builds, the rest await its
    /// broadcast result. A missing or unparsable regular document yields
    /// `MetadataNotFound` for every waiter and leaves the package Unloaded.
    /// A builder whose task is dropped mid-fetch (caller cancellation) leaves
    /// a dead Loading slot behind; the next waiter reclaims it and becomes
    /// the builder itself, so no package ever sticks in Loading.
    pub async fn lookup_maps(&self, package_code: &str) -> Result<Arc<PackageLookup>> {
        loop {
            let role = {
                let mut slots = self.inner.slots.lock().await;
                match slots.get(package_code) {
                    Some(PackageSlot::Ready(lookup)) => return Ok(Arc::clone(lookup)),
                    Some(PackageSlot::Loading(rx)) => Role::Wait(rx.clone()),
                    None => {
                        let (tx, rx) = watch::channel(None);
                        slots.insert(package_code.to_string(), PackageSlot::Loading(rx));
                        Role::Build(tx)
                    }
                }
            };

            match role {
                Role::Wait(mut rx) => {
                    debug!("Awaiting in-flight lookup build for package {}", package_code);
                    // Clone the broadcast value out of the watch Ref before matching so
                    // the mutable borrow of `rx` ends here; the Err arm below
                    // needs `&rx` for same_channel.
                    let waited = rx.wait_for(Option::is_some).await.map(|result| result.clone());
                    match waited {
                        Ok(result) => {
                            return match result {
                                Some(outcome) => outcome,
                                // wait_for only returns once the value is Some
                                None => {
                                    Err(CardCacheError::MetadataNotFound(package_code.to_string()))
                                }
                            };
                        }
                        Err(_) => {
                            // The builder dropped its sender without
                            // broadcasting: its task was cancelled mid-fetch.
                            // Reclaim the dead slot (unless someone already
                            // replaced it) and go around again.
                            debug!(
                                "Build for package {} was cancelled; reclaiming slot",
                                package_code
                            );
                            let mut slots = self.inner.slots.lock().await;
                            let dead = matches!(
                                slots.get(package_code),
                                Some(PackageSlot::Loading(current)) if current.same_channel(&rx)
                            );
                            if dead {
                                slots.remove(package_code);
                            }
                        }
                    }
                }
                Role::Build(tx) => {
                    let my_rx = tx.subscribe();
                    let result = self.build_lookup(package_code).await;

                    {
                        let mut slots = self.inner.slots.lock().await;
                        // Only install if our Loading slot is still current: an
                        // invalidation that raced the build wins, and the next
                        // caller rebuilds from fresh documents.
                        let still_mine = matches!(
                            slots.get(package_code),
                            Some(PackageSlot::Loading(rx)) if rx.same_channel(&my_rx)
                        );
                        if still_mine {
                            match &result {
                                Ok(lookup) => {
                                    slots.insert(
                                        package_code.to_string(),
                                        PackageSlot::Ready(Arc::clone(lookup)),
                                    );
                                }
                                Err(_) => {
                                    slots.remove(package_code);
                                }
                            }
                        }
                    }

                    let _ = tx.send(Some(result.clone()));
                    return result;
                }
            }
        }
    }

    /// Fetches both bulk documents and builds the lookup maps.
    async fn build_lookup(&self, package_code: &str) -> BuildResult {
        let regular_doc = match self
            .inner
            .fetcher
            .fetch_package_document(package_code, DocumentKind::Regular)
            .await
        {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                warn!("No regular card map for package {}", package_code);
                return Err(CardCacheError::MetadataNotFound(package_code.to_string()));
            }
            Err(err) => {
                warn!(
                    "Failed to fetch regular card map for package {}: {}",
                    package_code, err
                );
                return Err(CardCacheError::MetadataNotFound(package_code.to_string()));
            }
        };

        let regular = build_regular_lookup(&regular_doc)
            .ok_or_else(|| CardCacheError::MetadataNotFound(package_code.to_string()))?;

        // The special document is optional: fetch errors and absence both
        // degrade to an empty override lookup.
        let special_doc = match self
            .inner
            .fetcher
            .fetch_package_document(package_code, DocumentKind::Special)
            .await
        {
            Ok(doc) => doc,
            Err(err) => {
                debug!(
                    "No special card map for package {} ({}); using defaults",
                    package_code, err
                );
                None
            }
        };
        let special = build_special_lookup(special_doc.as_ref());

        info!(
            "Built lookup maps for package {}: {} regular cards, {} special entries",
            package_code,
            regular.len(),
            special.len()
        );

        Ok(Arc::new(PackageLookup { regular, special }))
    }

    // == Card Names ==
    /// Returns the global card-name table, fetching it on first use.
    ///
    /// A fetch failure degrades to an empty table for this call without
    /// caching the failure, so a later call retries.
    pub(crate) async fn card_names(&self) -> Arc<CardNameTable> {
        let loaded = self
            .inner
            .card_names
            .get_or_try_init(|| async {
                let doc = self.inner.fetcher.fetch_card_names().await?;
                let table = build_name_table(&doc);
                info!("Loaded card-name table with {} entries", table.len());
                Ok::<_, anyhow::Error>(Arc::new(table))
            })
            .await;

        match loaded {
            Ok(table) => Arc::clone(table),
            Err(err) => {
                warn!("Failed to load card-name table: {}; names will be empty", err);
                Arc::new(CardNameTable::new())
            }
        }
    }

    // == Invalidate ==
    /// Purges cached lookup state.
    ///
    /// With a package code, drops that package's slot (Ready or Loading) and
    /// cancels its pending invalidation timer; with `None`, drops every
    /// package and cancels all timers. A build in flight at invalidation
    /// time still answers its current waiters but does not install its
    /// result.
    pub async fn invalidate(&self, package_code: Option<&str>) {
        match package_code {
            Some(pkg) => {
                // Slot first, then timer: a timer-fired self-invalidation
                // aborts its own task and must have finished the purge by then.
                self.inner.slots.lock().await.remove(pkg);
                if let Some(handle) = self.inner.timers.lock().await.remove(pkg) {
                    handle.abort();
                }
                info!("Invalidated metadata cache for package {}", pkg);
            }
            None => {
                self.inner.slots.lock().await.clear();
                let mut timers = self.inner.timers.lock().await;
                for (_, handle) in timers.drain() {
                    handle.abort();
                }
                info!("Invalidated metadata cache for all packages");
            }
        }
    }

    // == Schedule Invalidation ==
    /// Arms a one-shot timer that invalidates the package after `delay`.
    ///
    /// Re-arming for the same package cancels and replaces the pending timer
    /// (debounced, not stacked). Used after a bulk card write: in-flight
    /// reads keep serving the slightly stale index, avoiding a stampede
    /// right after upload, while convergence within `delay` is guaranteed.
    pub async fn schedule_invalidation(&self, package_code: &str, delay: Duration) {
        let mut timers = self.inner.timers.lock().await;

        if let Some(previous) = timers.remove(package_code) {
            previous.abort();
            debug!("Replaced pending invalidation timer for package {}", package_code);
        }

        let index = self.clone();
        let pkg = package_code.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            info!("Scheduled invalidation firing for package {}", pkg);
            index.invalidate(Some(&pkg)).await;
        });

        timers.insert(package_code.to_string(), handle);
        info!(
            "Scheduled invalidation for package {} in {:?}",
            package_code, delay
        );
    }

    // == Status ==
    /// Debugging snapshot of the index state.
    pub async fn status(&self) -> IndexStatus {
        let slots = self.inner.slots.lock().await;
        let mut ready_packages = Vec::new();
        let mut loading_packages = Vec::new();
        for (pkg, slot) in slots.iter() {
            match slot {
                PackageSlot::Ready(_) => ready_packages.push(pkg.clone()),
                PackageSlot::Loading(_) => loading_packages.push(pkg.clone()),
            }
        }
        drop(slots);

        let mut scheduled_invalidations: Vec<String> =
            self.inner.timers.lock().await.keys().cloned().collect();

        ready_packages.sort();
        loading_packages.sort();
        scheduled_invalidations.sort();

        IndexStatus {
            ready_packages,
            loading_packages,
            scheduled_invalidations,
            card_names_loaded: self.inner.card_names.initialized(),
            generated_at: chrono::Utc::now(),
        }
    }
}
