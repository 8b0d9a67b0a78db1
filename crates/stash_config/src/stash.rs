use serde::Deserialize;

use crate::validation::{validate, ConfigReport};
use crate::{GlobalConfig, ProxyConfig};

// =======================================================
// STASH CONFIG: main config
// =======================================================
#[derive(Debug, Clone, Deserialize)]
pub struct StashConfig {
    #[serde(default)]
    pub global: GlobalConfig,

    #[serde(default)]
    pub proxy: ProxyConfig,
}

impl Default for StashConfig {
    fn default() -> Self {
        let mut cfg = Self {
            global: GlobalConfig::default(),
            proxy: ProxyConfig::default(),
        };
        cfg.apply_defaults();
        cfg
    }
}

impl StashConfig {
    pub fn global(&self) -> &GlobalConfig {
        &self.global
    }

    pub fn proxy(&self) -> &ProxyConfig {
        &self.proxy
    }

    /// Validate the configuration and return a report of warnings and errors.
    pub fn validate(&self) -> ConfigReport {
        validate(self)
    }

    /// Loads `file_name` (TOML, optional) and then `STASH_*` environment
    /// variables, e.g. `STASH_PROXY__PORT=3000`.
    pub fn from_file(file_name: &str) -> Result<Self, config::ConfigError> {
        let built = config::Config::builder()
            .add_source(config::File::new(file_name, config::FileFormat::Toml).required(false))
            .add_source(
                config::Environment::with_prefix("STASH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut cfg: StashConfig = built.try_deserialize()?;

        cfg.apply_defaults();
        Ok(cfg)
    }

    /// Command line values win over file and environment.
    pub fn with_overrides(mut self, port: Option<u16>, origin: Option<String>) -> Self {
        if let Some(port) = port {
            self.proxy.port = port;
        }
        if let Some(origin) = origin {
            self.proxy.origin = origin;
        }
        self
    }

    fn apply_defaults(&mut self) {
        let def_global = GlobalConfig::default();
        self.global.apply_defaults_from(&def_global);

        let def_proxy = ProxyConfig::default();
        self.proxy.apply_defaults_from(&def_proxy);
    }

    pub fn print(&self) {
        println!("================ STASH CONFIG ================");
        self.print_global();
        self.print_proxy();
        println!("==============================================");
    }

    fn print_global(&self) {
        println!("\n[global]");
        println!("  log_level            = {}", self.global.log_level);
        println!("  max_connections      = {}", self.global.max_connections);
    }

    fn print_proxy(&self) {
        println!("\n[proxy]");
        println!("  listen               = {}", self.proxy.listen_addr());
        println!("  origin               = {}", self.proxy.origin);
        println!(
            "  origin_timeout_secs  = {}",
            self.proxy.origin_timeout_secs
        );
        println!("  cache_ttl_secs       = {}", self.proxy.cache_ttl_secs);
        println!(
            "  cache_sweep_interval_secs = {:?}",
            self.proxy.cache_sweep_interval_secs
        );
        println!("  stats_path           = {}", self.proxy.stats_path);
    }
}
