//! Transport error types.
//!
//! - [`HttpResponseError`]: the backend answered with a non-2xx status
//! - [`MaxHttpRetriesExceededError`]: the transport gave up retrying
//! - [`InvalidHttpRequestError`]: a request failed validation before sending
//! - [`HttpError`]: unified error returned by every [`Transport`](crate::clients::Transport)
//!
//! # Example
//!
//! ```rust,ignore
//! use crud_rest_provider::clients::HttpError;
//!
//! match transport.fetch(request).await {
//!     Ok(response) => println!("{}", response.json),
//!     Err(HttpError::Response(e)) => println!("backend error {}: {}", e.code, e.message),
//!     Err(HttpError::MaxRetries(e)) => println!("gave up after {} tries", e.tries),
//!     Err(HttpError::InvalidRequest(e)) => println!("invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("network error: {e}"),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

/// Error returned when the backend replies with a non-2xx status.
///
/// `message` is the `message` string of the reply body when the backend
/// provides one, otherwise the canonical reason phrase of the status.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Human-readable error message.
    pub message: String,
    /// The decoded reply body.
    pub body: Value,
}

/// Error returned when the transport exhausted its retry attempts.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Error message from the last response.
    pub message: String,
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST, PUT or PATCH request was built without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request has no URL.
    #[error("Cannot send a request without a URL.")]
    EmptyUrl,
}

/// Unified error type for transport failures.
///
/// The provider propagates this error unchanged; it adds no retry or
/// translation of its own.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The backend answered with a non-2xx status.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Retry attempts were exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code when the error came from a reply.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }
}
