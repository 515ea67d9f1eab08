//! In-memory cache with creation-time expiry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use pokedex_core::constants::DEFAULT_CACHE_INTERVAL_MS;
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::traits::ResponseCache;

use crate::reaper::Reaper;

/// Cache entry. Replaced wholesale on re-add, never mutated.
#[derive(Clone)]
struct CacheEntry {
    data: Bytes,
    created_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant, interval: Duration) -> bool {
        now.saturating_duration_since(self.created_at) > interval
    }
}

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum entry age, and period of the background sweep, in milliseconds
    pub interval_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_CACHE_INTERVAL_MS,
        }
    }
}

impl CacheConfig {
    /// Creates a config with the given interval.
    ///
    /// Fails if `interval` is not a whole number of milliseconds.
    pub fn with_interval(interval: Duration) -> Result<Self> {
        if interval.subsec_nanos() % 1_000_000 != 0 {
            return Err(PokedexError::ConfigError(format!(
                "cache interval {interval:?} is not a whole number of milliseconds"
            )));
        }
        let interval_ms = u64::try_from(interval.as_millis()).map_err(|_| {
            PokedexError::ConfigError(format!("cache interval {interval:?} is too long"))
        })?;

        Ok(Self { interval_ms })
    }

    /// The interval as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// The entry map shared between the cache handle and its reaper.
pub(crate) struct Store {
    entries: RwLock<HashMap<String, CacheEntry>>,
    interval: Duration,
}

impl Store {
    fn new(interval: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            interval,
        }
    }

    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    /// Removes every entry older than the interval. Returns how many went.
    pub(crate) fn reap_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(now, self.interval));
        before - entries.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }
}

/// Time-expiring cache of raw response bodies, keyed by request URL.
///
/// Thread-safe. Readers share a read lock; [`add`](Self::add) and the
/// background sweep take the write lock. Expiry is measured from when an
/// entry was added, never from when it was last read.
///
/// Construction spawns a reaper on the current tokio runtime. The reaper
/// stops when the cache is dropped or [`shutdown`](Self::shutdown) is awaited.
///
/// # Example
///
/// ```rust
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> pokedex_core::Result<()> {
/// use std::time::Duration;
/// use pokedex_cache::ExpiringCache;
///
/// let cache = ExpiringCache::new(Duration::from_secs(5))?;
/// cache.add("https://pokeapi.co/api/v2/pokemon/pikachu", "{}");
/// assert!(cache.get("https://pokeapi.co/api/v2/pokemon/pikachu").is_some());
/// cache.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct ExpiringCache {
    store: Arc<Store>,
    reaper: Option<Reaper>,
}

impl ExpiringCache {
    /// Creates a cache whose entries expire `interval` after being added.
    ///
    /// Fails if `interval` is zero or if called outside a tokio runtime.
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(PokedexError::ConfigError(
                "cache interval must be greater than zero".into(),
            ));
        }

        let store = Arc::new(Store::new(interval));
        let reaper = Reaper::spawn(Arc::clone(&store))?;

        Ok(Self {
            store,
            reaper: Some(reaper),
        })
    }

    /// Creates a cache from a [`CacheConfig`].
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        Self::new(config.interval())
    }

    /// Stores `data` under `key`, replacing any existing entry and resetting its age.
    pub fn add(&self, key: &str, data: impl Into<Bytes>) {
        let entry = CacheEntry {
            data: data.into(),
            created_at: Instant::now(),
        };
        trace!(key, bytes = entry.data.len(), "Cache add");
        self.store.entries.write().insert(key.to_string(), entry);
    }

    /// Returns the bytes stored under `key`.
    ///
    /// Entries older than the interval are reported as absent even if the
    /// reaper has not swept them yet. Reading never refreshes an entry's age.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let now = Instant::now();
        let entries = self.store.entries.read();
        match entries.get(key) {
            Some(e) if !e.is_expired(now, self.store.interval) => {
                trace!(key, "Cache hit");
                Some(e.data.clone())
            }
            _ => {
                trace!(key, "Cache miss");
                None
            }
        }
    }

    /// Runs one sweep immediately, on the caller's thread.
    pub fn reap_expired(&self) -> usize {
        self.store.reap_expired()
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The configured expiry interval.
    pub fn interval(&self) -> Duration {
        self.store.interval
    }

    /// Returns true while the background reaper is alive.
    pub fn is_reaping(&self) -> bool {
        self.reaper.as_ref().is_some_and(Reaper::is_running)
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let entries = self.store.entries.read();
        let expired = entries
            .values()
            .filter(|e| e.is_expired(now, self.store.interval))
            .count();
        let total_bytes = entries.values().map(|e| e.data.len()).sum();

        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            live_entries: entries.len().saturating_sub(expired),
            total_bytes,
            interval: self.store.interval,
        }
    }

    /// Stops the reaper and waits for it to finish.
    pub async fn shutdown(mut self) {
        if let Some(reaper) = self.reaper.take() {
            reaper.stop();
            reaper.join().await;
        }
        debug!(entries = self.store.len(), "Cache shut down");
    }
}

impl Drop for ExpiringCache {
    fn drop(&mut self) {
        if let Some(reaper) = &self.reaper {
            reaper.stop();
        }
    }
}

impl ResponseCache for ExpiringCache {
    fn add(&self, key: &str, data: Bytes) {
        ExpiringCache::add(self, key, data);
    }

    fn get(&self, key: &str) -> Option<Bytes> {
        ExpiringCache::get(self, key)
    }
}

impl std::fmt::Debug for ExpiringCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("interval", &self.store.interval)
            .field("entries", &self.store.len())
            .field("reaping", &self.is_reaping())
            .finish()
    }
}

/// Cache statistics.
#[derive(Clone, Debug)]
pub struct CacheStats {
    /// Total entries (including expired, not yet swept)
    pub total_entries: usize,
    /// Entries older than the interval
    pub expired_entries: usize,
    /// Entries still served by `get`
    pub live_entries: usize,
    /// Sum of payload sizes
    pub total_bytes: usize,
    /// Configured expiry interval
    pub interval: Duration,
}
