//! TTL Sweep Task
//!
//! Background task that periodically removes expired response-cache entries.
//! Lazy expiry on `get` only purges keys that are read again; the sweep
//! bounds memory for keys written once and never re-read.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ResponseCache;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task runs in an infinite loop, sleeping for the configured interval
/// between sweeps. It acquires a write lock on the cache only for the purge
/// itself. Purging a key the lazy-expiry path already removed is a no-op,
/// so the sweep and in-flight `get` calls never need to serialize further.
///
/// # Arguments
/// * `cache` - Shared reference to the response cache
/// * `sweep_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which the host can abort during
/// graceful shutdown.
pub fn spawn_sweep_task<V>(
    cache: Arc<RwLock<ResponseCache<V>>>,
    sweep_interval_secs: u64,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.purge_expired()
            };

            if removed > 0 {
                info!("TTL sweep: purged {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sweep_task_removes_expired_entries() {
        let cache = Arc::new(RwLock::new(ResponseCache::new(100)));

        // Entry that expires well before the first sweep
        {
            let mut cache_guard = cache.write().await;
            cache_guard.set(
                "expire_soon".to_string(),
                "value".to_string(),
                Duration::from_millis(100),
            );
        }

        let handle = spawn_sweep_task(cache.clone(), 1);

        // Wait for the entry to expire and a sweep to run
        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let cache_guard = cache.read().await;
            assert!(
                cache_guard.keys().is_empty(),
                "Expired entry should have been swept without being read"
            );
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_valid_entries() {
        let cache = Arc::new(RwLock::new(ResponseCache::new(100)));

        {
            let mut cache_guard = cache.write().await;
            cache_guard.set(
                "long_lived".to_string(),
                "value".to_string(),
                Duration::from_secs(3600),
            );
        }

        let handle = spawn_sweep_task(cache.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let mut cache_guard = cache.write().await;
            assert_eq!(
                cache_guard.get("long_lived"),
                Some("value".to_string()),
                "Valid entry should not be swept"
            );
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let cache: Arc<RwLock<ResponseCache<String>>> = Arc::new(RwLock::new(ResponseCache::new(100)));

        let handle = spawn_sweep_task(cache, 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
