//! Fetch-or-serve pipeline in front of a single origin.

mod client;
mod error;
mod origin;
mod pipeline;
mod result;

pub use error::FetchError;
pub use origin::Origin;
pub use pipeline::{FetchPipeline, DEFAULT_ORIGIN_TIMEOUT};
pub use result::FetchResult;
