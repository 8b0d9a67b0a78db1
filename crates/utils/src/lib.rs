use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Extra directives layered on top of the default `info` level.
const DEFAULT_CRATE_DIRECTIVES: &str = "stash=debug";

/// Installs the global subscriber. `RUST_LOG` wins over `log_level`.
pub fn init_tracing(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directives(log_level)))
        .unwrap_or_else(|_| EnvFilter::new(format!("info,{DEFAULT_CRATE_DIRECTIVES}")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(true)
                .with_thread_ids(false),
        )
        .init();
}

/// Plain `info` also turns on debug output for our own targets.
/// Any other level, or a full directive string, is used as given.
fn filter_directives(log_level: &str) -> String {
    let level = log_level.trim();
    if level.eq_ignore_ascii_case("info") {
        format!("{level},{DEFAULT_CRATE_DIRECTIVES}")
    } else {
        level.to_string()
    }
}
