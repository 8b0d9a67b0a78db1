use std::time::Duration;

use http::StatusCode;
use thiserror::Error;

/// Ways a fetch from the origin can fail before a usable response exists.
///
/// None of these escape [`crate::FetchPipeline::resolve`]; they are folded
/// into the result's status code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("origin did not respond within {0:?}")]
    Timeout(Duration),

    #[error("origin request failed: {0}")]
    Transport(String),

    #[error("invalid origin url: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Status reported to the client for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            FetchError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            FetchError::Transport(_) | FetchError::InvalidUrl(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub(crate) fn transport(err: impl std::fmt::Display) -> Self {
        FetchError::Transport(err.to_string())
    }
}
