//! Time-expiring response cache for the Pokedex shell.
//!
//! An in-memory map guarded by a single reader-writer lock, with a background
//! reaper that sweeps out entries older than the configured interval.
//!
//! The whole map sits behind one lock. That is fine for the few hundred
//! responses a session produces; it is the first thing to revisit if the
//! cache is ever shared by many hot writers.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;
mod reaper;

pub use cache::{CacheConfig, CacheStats, ExpiringCache};
