//! Error types for the request helper.
//!
//! # Design
//! Only `InvalidArgument` can surface synchronously (from `build`). Every
//! other variant is produced while a `PendingRequest` runs and is delivered
//! through the completion callback, never raised from `send` itself.

use thiserror::Error;

/// Errors produced while building, sending, or parsing a request.
#[derive(Debug, Error)]
pub enum AjayError {
    /// A required argument was missing or unusable, e.g. an empty endpoint
    /// URL or a target that cannot be turned into a request.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The request never produced a response (connection refused, reset,
    /// timed out).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A payload could not be converted into `Params`.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The async runtime or the HTTP client could not be started.
    #[error("runtime unavailable: {0}")]
    Runtime(String),
}

impl From<reqwest::Error> for AjayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            AjayError::InvalidArgument(err.to_string())
        } else {
            AjayError::Network(err.to_string())
        }
    }
}
