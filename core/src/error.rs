//! Error types for the reviews API client.
//!
//! # Design
//! Callers see exactly one failure kind per call: `UnauthorizedToken`.
//! HTTP error statuses, transport failures and unparseable bodies all
//! collapse into it; the underlying `CallFailure` is kept only as the error
//! source for diagnostics. Construction problems are reported separately
//! through `ConfigError`, before any request is made.

use thiserror::Error;

/// The single error returned by every `ReviewsClient` operation.
#[derive(Debug, Error)]
#[error("unauthorized token: maybe it's time to change your token")]
pub struct UnauthorizedToken {
    #[source]
    cause: CallFailure,
}

impl UnauthorizedToken {
    pub fn new(cause: CallFailure) -> Self {
        Self { cause }
    }

    /// What actually went wrong underneath.
    pub fn cause(&self) -> &CallFailure {
        &self.cause
    }
}

impl From<CallFailure> for UnauthorizedToken {
    fn from(cause: CallFailure) -> Self {
        Self::new(cause)
    }
}

/// Underlying reason a call was turned into `UnauthorizedToken`.
#[derive(Debug, Error)]
pub enum CallFailure {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A 2xx response whose body is not JSON.
    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure raised by a `Transport` while issuing a request or reading its
/// response.
#[derive(Debug, Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Errors raised while building a client from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The credential variable is unset or not valid UTF-8.
    #[error("environment variable {var} must hold the API token")]
    MissingToken {
        var: &'static str,
        #[source]
        source: std::env::VarError,
    },
}
