//! Background sweep that evicts expired entries.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use pokedex_core::error::{PokedexError, Result};

use crate::cache::Store;

/// Handle to the reaper task of one cache.
pub(crate) struct Reaper {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Reaper {
    /// Spawns the sweep loop on the current tokio runtime.
    pub(crate) fn spawn(store: Arc<Store>) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| {
            PokedexError::ConfigError(format!("cache reaper needs a tokio runtime: {e}"))
        })?;

        let token = CancellationToken::new();
        let handle = runtime.spawn(run(store, token.clone()));

        Ok(Self { token, handle })
    }

    /// Signals the loop to exit at its next wake-up.
    pub(crate) fn stop(&self) {
        self.token.cancel();
    }

    pub(crate) fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Waits for the loop to exit. Call [`stop`](Self::stop) first.
    pub(crate) async fn join(self) {
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Cache reaper ended abnormally");
        }
    }
}

/// Sweeps `store` once per interval until `token` is cancelled.
///
/// The first sweep happens one full interval after start.
async fn run(store: Arc<Store>, token: CancellationToken) {
    let period = store.interval();
    let mut ticker = time::interval_at(time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(interval_ms = period.as_millis() as u64, "Cache reaper started");

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                let removed = store.reap_expired();
                if removed > 0 {
                    debug!(removed, remaining = store.len(), "Reaped expired cache entries");
                }
            }
        }
    }

    info!("Cache reaper stopped");
}
