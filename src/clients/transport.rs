//! The transport seam.
//!
//! The provider never talks to the network itself. It builds
//! [`HttpRequest`]s and hands them to a [`Transport`], which resolves to an
//! [`HttpResponse`] or fails with an [`HttpError`]. [`HttpClient`] is the
//! bundled reqwest implementation; any
//! `Fn(HttpRequest) -> impl Future<Output = Result<HttpResponse, HttpError>>`
//! closure is a transport as well.
//!
//! [`HttpClient`]: crate::clients::HttpClient
//!
//! # Example
//!
//! ```rust
//! use crud_rest_provider::clients::{HttpError, HttpRequest, HttpResponse, Transport};
//! use serde_json::json;
//!
//! let transport = |request: HttpRequest| async move {
//!     Ok::<_, HttpError>(HttpResponse::from_json(json!({ "url": request.url })))
//! };
//!
//! # tokio_test::block_on(async {
//! let response = transport.fetch(HttpRequest::get("https://test.test/api/books")).await.unwrap();
//! assert_eq!(response.json["url"], "https://test.test/api/books");
//! # });
//! ```

use std::future::Future;

use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;

/// Executes concrete HTTP requests on behalf of the provider.
///
/// Implementations own every network concern: connection management,
/// timeouts, retries and the mapping of non-2xx replies to errors.
pub trait Transport: Send + Sync {
    /// Executes `request` and resolves to the backend's reply.
    fn fetch(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<F, Fut> Transport for F
where
    F: Fn(HttpRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HttpResponse, HttpError>> + Send,
{
    fn fetch(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        self(request)
    }
}
