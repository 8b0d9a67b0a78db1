pub mod master;
pub mod state;
pub mod worker;

pub use state::ProxyState;
