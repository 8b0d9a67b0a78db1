use serde::Deserialize;

// =======================================================
// PROXY CONFIG + DEFAULTS
// =======================================================
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Interface the proxy binds to.
    pub host: String,
    /// Listen port. 0 means "not set".
    pub port: u16,
    /// Absolute URL of the origin server. Empty means "not set".
    pub origin: String,

    // Timeouts (seconds)
    pub origin_timeout_secs: u64,

    // Caché control
    /// TTL in seconds applied to every cached response.
    pub cache_ttl_secs: u64,
    /// Interval for the background purge of expired entries (optional).
    /// When unset, expiry only happens when a key is read.
    pub cache_sweep_interval_secs: Option<u64>,
    /// Loopback-only path that reports cache counters as JSON.
    pub stats_path: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            origin: String::new(),
            origin_timeout_secs: 30,
            cache_ttl_secs: 60,
            cache_sweep_interval_secs: None,
            stats_path: "/_stash/cache".into(),
        }
    }
}

impl ProxyConfig {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn origin_timeout_secs(&self) -> u64 {
        self.origin_timeout_secs
    }

    pub fn cache_ttl_secs(&self) -> u64 {
        self.cache_ttl_secs
    }

    /// Sweep interval, with 0 treated as disabled.
    pub fn cache_sweep_interval_secs(&self) -> Option<u64> {
        self.cache_sweep_interval_secs.filter(|secs| *secs > 0)
    }

    pub fn stats_path(&self) -> &str {
        &self.stats_path
    }

    /// "host:port" string handed to the listener.
    pub fn listen_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub(crate) fn apply_defaults_from(&mut self, defaults: &ProxyConfig) {
        if self.host.is_empty() {
            self.host = defaults.host.clone();
        }
        if self.origin_timeout_secs == 0 {
            self.origin_timeout_secs = defaults.origin_timeout_secs;
        }
        if self.cache_ttl_secs == 0 {
            self.cache_ttl_secs = defaults.cache_ttl_secs;
        }
        if self.stats_path.is_empty() {
            self.stats_path = defaults.stats_path.clone();
        }
    }
}
