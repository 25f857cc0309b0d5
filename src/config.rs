//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

/// Cache and index configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// The two TTL tiers mirror the reference deployment: a short tier for volatile
/// listings and a longer tier for package/type/rarity enumerations. They are
/// host-facing configuration, not part of the cache contract.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the response cache can hold
    pub cache_capacity: usize,
    /// Background sweep task interval in seconds
    pub sweep_interval_secs: u64,
    /// Short TTL tier in seconds, for volatile listing responses
    pub listing_ttl_secs: u64,
    /// Long TTL tier in seconds, for package/type/rarity enumerations
    pub enumeration_ttl_secs: u64,
    /// Delay in seconds between a bulk card write and the scheduled
    /// metadata-index invalidation for that package
    pub invalidation_delay_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum response-cache entries (default: 1000)
    /// - `SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 60)
    /// - `LISTING_TTL_SECS` - Short TTL tier in seconds (default: 600)
    /// - `ENUMERATION_TTL_SECS` - Long TTL tier in seconds (default: 1200)
    /// - `INVALIDATION_DELAY_SECS` - Post-write invalidation delay (default: 600)
    pub fn from_env() -> Self {
        Self {
            cache_capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            listing_ttl_secs: env::var("LISTING_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),
            enumeration_ttl_secs: env::var("ENUMERATION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1200),
            invalidation_delay_secs: env::var("INVALIDATION_DELAY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),
        }
    }

    /// TTL for volatile listing responses (the short tier).
    pub fn listing_ttl(&self) -> Duration {
        Duration::from_secs(self.listing_ttl_secs)
    }

    /// TTL for package/type/rarity enumerations (the long tier).
    pub fn enumeration_ttl(&self) -> Duration {
        Duration::from_secs(self.enumeration_ttl_secs)
    }

    /// Delay between a bulk write and the scheduled index invalidation.
    pub fn invalidation_delay(&self) -> Duration {
        Duration::from_secs(self.invalidation_delay_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            sweep_interval_secs: 60,
            listing_ttl_secs: 600,
            enumeration_ttl_secs: 1200,
            invalidation_delay_secs: 600,
        }
    }
}
