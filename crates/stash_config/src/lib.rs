mod global;
mod proxy;
mod stash;
mod validation;

pub use global::GlobalConfig;
pub use proxy::ProxyConfig;
pub use stash::StashConfig;
pub use validation::{validate, ConfigReport};
