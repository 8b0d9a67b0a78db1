use std::sync::Arc;

use stash_config::StashConfig;
use tracing::instrument;

use crate::ProxyState;

mod accept;
mod startup;
mod sweep;

pub use accept::bind_listener;

/// Owns the process-wide pieces: config, proxy state, listener.
pub struct Master {
    cfg: Arc<StashConfig>,
}

impl Master {
    pub fn new(cfg: StashConfig) -> Self {
        Self { cfg: Arc::new(cfg) }
    }

    /// Builds the shared state, binds the listener and runs the accept loop.
    #[instrument(skip(self), fields(
        listen = %self.cfg.proxy.listen_addr(),
        origin = %self.cfg.proxy.origin(),
        max_connections = self.cfg.global.max_connections,
    ))]
    pub async fn run(self) -> anyhow::Result<()> {
        self.log_startup();

        let semaphore = self.init_semaphore();
        let state = Arc::new(ProxyState::from_config(&self.cfg)?);
        let _sweeper = self.start_sweeper(&state);

        let listen_addr = self.cfg.proxy.listen_addr();
        let listener = bind_listener(&listen_addr).await?;

        accept::accept_loop(listener, listen_addr, semaphore, state).await
    }
}
