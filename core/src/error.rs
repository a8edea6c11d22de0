//! Error types for the Statamic REST client.
//!
//! # Design
//! Transport failures are carried as a boxed error so any `Transport`
//! implementation can surface its own error type unchanged. Non-2xx
//! responses are not errors on their own: a terminal call returns whatever
//! the server answered, and `Response::error_for_status` opts into
//! `NotFound` / `HttpError` when the caller wants status interpretation.

use thiserror::Error;

/// Boxed error returned by `Transport` implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by the client and its response reader.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport could not complete the round trip (DNS, connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// An asset id did not split into exactly `container::path`.
    #[error("malformed asset identifier {0:?}, expected `container::path`")]
    MalformedIdentifier(String),

    /// The decoded body has no such top-level field.
    #[error("response body has no `{0}` field")]
    MissingField(&'static str),

    /// The body is not valid JSON, or does not match the requested type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;
