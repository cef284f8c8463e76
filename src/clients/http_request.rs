//! HTTP request types.
//!
//! An [`HttpRequest`] is the concrete request shape the provider hands to a
//! [`Transport`](crate::clients::Transport): an absolute URL, a method and
//! an optional JSON body.

use std::fmt;

use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the CRUD backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET, used for every read action.
    #[default]
    Get,
    /// HTTP POST, used for `create`.
    Post,
    /// HTTP PUT, used for each request of `update-many`.
    Put,
    /// HTTP PATCH, used for `update`.
    Patch,
    /// HTTP DELETE, used for `delete` and `delete-many`.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` for methods that must carry a body.
    #[must_use]
    pub const fn requires_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to be executed by a transport.
///
/// # Example
///
/// ```rust
/// use crud_rest_provider::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "https://test.test/api/books/5")
///     .build()
///     .unwrap();
/// assert!(get_request.body.is_none());
///
/// let post_request = HttpRequest::builder(HttpMethod::Post, "https://test.test/api/books")
///     .json_body(&json!({"name": "x"}))
///     .build()
///     .unwrap();
/// assert_eq!(post_request.body.as_deref(), Some(r#"{"name":"x"}"#));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method, GET unless set otherwise.
    pub method: HttpMethod,
    /// The absolute URL including the query string.
    pub url: String,
    /// The serialized JSON body, if any.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Creates a body-less GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            body: None,
        }
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::MissingBody`] when a POST, PUT or
    /// PATCH request has no body, and [`InvalidHttpRequestError::EmptyUrl`]
    /// when the URL is empty.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.url.is_empty() {
            return Err(InvalidHttpRequestError::EmptyUrl);
        }

        if self.method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    method: HttpMethod,
    url: String,
    body: Option<String>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    /// Sets an already-serialized body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the JSON body.
    #[must_use]
    pub fn json_body(mut self, value: &Value) -> Self {
        self.body = Some(value.to_string());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            method: self.method,
            url: self.url,
            body: self.body,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_method_defaults_to_get() {
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "https://test.test/api/books")
            .build()
            .unwrap();

        assert_eq!(request, HttpRequest::get("https://test.test/api/books"));
    }

    #[test]
    fn test_builder_serializes_json_body() {
        let request = HttpRequest::builder(HttpMethod::Patch, "https://test.test/api/books/1")
            .json_body(&json!({"year": 1999}))
            .build()
            .unwrap();

        assert_eq!(request.method, HttpMethod::Patch);
        assert_eq!(request.body.as_deref(), Some(r#"{"year":1999}"#));
    }

    #[test]
    fn test_verify_requires_body_for_writes() {
        for method in [HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch] {
            let result = HttpRequest::builder(method, "https://test.test/api/books").build();
            assert!(matches!(
                result,
                Err(InvalidHttpRequestError::MissingBody { method: m }) if m == method.as_str()
            ));
        }
    }

    #[test]
    fn test_delete_does_not_require_body() {
        let request = HttpRequest::builder(HttpMethod::Delete, "https://test.test/api/books/1")
            .build()
            .unwrap();
        assert!(request.body.is_none());
    }

    #[test]
    fn test_verify_rejects_empty_url() {
        let result = HttpRequest::builder(HttpMethod::Get, "").build();
        assert!(matches!(result, Err(InvalidHttpRequestError::EmptyUrl)));
    }
}
