//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the cache is live.
//!
//! # Tasks
//! - `spawn_sweep_task`: periodically purges expired response-cache entries

mod sweep;

pub use sweep::spawn_sweep_task;
