use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::info;

use super::Master;

impl Master {
    pub(super) fn log_startup(&self) {
        info!(target: "stash::master", "Caching proxy start");
        info!(
            target: "stash::master",
            listen = %self.cfg.proxy.listen_addr(),
            origin = %self.cfg.proxy.origin(),
            origin_timeout_secs = self.cfg.proxy.origin_timeout_secs(),
            cache_ttl_secs = self.cfg.proxy.cache_ttl_secs(),
            log_level = %self.cfg.global.log_level(),
            "Configuration loaded"
        );
    }

    pub(super) fn init_semaphore(&self) -> Arc<Semaphore> {
        let max_conns = self.cfg.global.max_connections() as usize;
        let semaphore = Arc::new(Semaphore::new(max_conns));
        info!(
            target: "stash::master",
            max_conns,
            "Global connection semaphore initialized"
        );
        semaphore
    }
}
