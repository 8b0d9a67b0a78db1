use std::sync::Arc;

use stash_cache::CacheStore;
use tokio::{task::JoinHandle, time::Duration};
use tracing::{debug, info};

use super::Master;
use crate::ProxyState;

impl Master {
    /// Spawns the expired-entry sweeper when `cache_sweep_interval_secs` is set.
    /// Without it, entries only expire when their key is read again.
    pub(super) fn start_sweeper(&self, state: &Arc<ProxyState>) -> Option<JoinHandle<()>> {
        let secs = self.cfg.proxy.cache_sweep_interval_secs()?;
        info!(
            target: "stash::master",
            interval_secs = secs,
            "Starting background cache sweeper"
        );
        Some(spawn_sweeper(state.store().clone(), Duration::from_secs(secs)))
    }
}

pub(crate) fn spawn_sweeper(store: Arc<CacheStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // First tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = store.purge_expired();
            if removed > 0 {
                debug!(
                    target: "stash::cache",
                    removed,
                    remaining = store.len(),
                    "Swept expired cache entries"
                );
            }
        }
    })
}
