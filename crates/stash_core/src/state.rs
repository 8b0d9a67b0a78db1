use std::sync::Arc;

use anyhow::Context;
use stash_cache::{CachePolicy, CacheStore};
use stash_config::StashConfig;
use stash_fetch::{FetchPipeline, Origin};
use tokio::time::Duration;

/// Everything a request handler needs, built once per process and shared
/// behind an `Arc`.
pub struct ProxyState {
    pipeline: FetchPipeline,
    origin: Origin,
    stats_path: String,
}

impl ProxyState {
    pub fn new(pipeline: FetchPipeline, origin: Origin, stats_path: impl Into<String>) -> Self {
        Self {
            pipeline,
            origin,
            stats_path: stats_path.into(),
        }
    }

    pub fn from_config(cfg: &StashConfig) -> anyhow::Result<Self> {
        let origin = Origin::parse(cfg.proxy.origin())
            .with_context(|| format!("invalid origin URL '{}'", cfg.proxy.origin()))?;

        let policy = CachePolicy::new(Duration::from_secs(cfg.proxy.cache_ttl_secs()));
        let store = Arc::new(CacheStore::with_policy(policy));
        let pipeline = FetchPipeline::with_timeout(
            store,
            Duration::from_secs(cfg.proxy.origin_timeout_secs()),
        );

        Ok(Self::new(pipeline, origin, cfg.proxy.stats_path()))
    }

    pub fn pipeline(&self) -> &FetchPipeline {
        &self.pipeline
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        self.pipeline.store()
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn stats_path(&self) -> &str {
        &self.stats_path
    }
}
