//! Transport layer.
//!
//! The provider translates actions into [`HttpRequest`]s and hands them to
//! a [`Transport`]. This module holds the request/response types, the
//! transport trait and the bundled reqwest transport.
//!
//! - [`Transport`]: the injected request executor
//! - [`HttpClient`]: reqwest implementation of [`Transport`]
//! - [`HttpRequest`] / [`HttpRequestBuilder`]: a concrete request (URL, method, body)
//! - [`HttpResponse`]: a decoded reply (status, headers, JSON)
//! - [`HttpMethod`]: GET, POST, PUT, PATCH, DELETE
//! - [`HttpError`]: unified transport error
//!
//! # Retry Behavior
//!
//! Retries belong to the transport. [`HttpClient`] attempts each request
//! once by default; [`HttpClient::with_tries`] enables retries for 429
//! (honouring `Retry-After`) and 5xx replies.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use transport::Transport;
