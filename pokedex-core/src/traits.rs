//! Common traits for the Pokedex shell.
//!
//! Fetchers depend on [`ResponseCache`] rather than a concrete cache so the
//! cache can be injected per session and swapped out in tests.

use bytes::Bytes;

// ═══════════════════════════════════════════════════════════════════════════════
// RESPONSE CACHE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Key-value store for raw response bodies, keyed by request URL.
///
/// Both operations are infallible. The cache never interprets the payload.
pub trait ResponseCache: Send + Sync {
    /// Stores `data` under `key`, replacing any previous entry and resetting its age.
    fn add(&self, key: &str, data: Bytes);

    /// Returns the bytes stored under `key`, or `None` if absent or expired.
    fn get(&self, key: &str) -> Option<Bytes>;
}

/// A cache that stores nothing. Every lookup misses.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCache;

impl ResponseCache for NoCache {
    fn add(&self, _key: &str, _data: Bytes) {}

    fn get(&self, _key: &str) -> Option<Bytes> {
        None
    }
}
