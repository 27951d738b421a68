//! Gateway error types.

use thiserror::Error;

/// Errors raised while talking to the storage service.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Storage service did not answer within the configured timeout.
    #[error("storage service timed out: {0}")]
    Timeout(String),

    /// Storage service could not be reached (refused, DNS, reset).
    #[error("storage service unreachable: {0}")]
    Transport(String),

    /// Storage service answered with a body that is not JSON.
    #[error("storage service returned an invalid body: {0}")]
    Decode(String),

    /// HTTP client could not be built.
    #[error("gateway configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
