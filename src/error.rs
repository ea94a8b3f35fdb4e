//! Error types for Rollbar API operations.

use thiserror::Error;

/// Errors that can occur during Rollbar API operations.
#[derive(Debug, Error)]
pub enum RollbarError {
    /// Client construction failed: malformed base URL, missing environment
    /// variable, or a failing configuration option.
    #[error("invalid client configuration: {0}")]
    Configuration(String),

    /// HTTP transport error: the request could not be built or the network
    /// exchange failed.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response status was not 200. Redirects are not followed, so 3xx
    /// codes surface here too.
    #[error("unexpected HTTP status {code}")]
    UnexpectedStatus { code: u16 },

    /// A 200 response carried a body that failed to decode.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias for Rollbar operations.
pub type Result<T> = core::result::Result<T, RollbarError>;
