//! HTTP response types.
//!
//! An [`HttpResponse`] is the transport's reply: a status code, the
//! response headers and the decoded JSON body.

use std::collections::HashMap;

use serde_json::Value;

/// A transport reply.
///
/// Header names are stored lower-cased; a header may carry several values.
/// A missing or non-JSON body is represented as [`Value::Null`].
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers.
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded response body.
    pub json: Value,
}

impl HttpResponse {
    /// Creates a new response. Header names are lower-cased.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, json: Value) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, values)| (name.to_lowercase(), values))
            .collect();

        Self {
            code,
            headers,
            json,
        }
    }

    /// Creates a `200 OK` response with no headers.
    ///
    /// # Example
    ///
    /// ```rust
    /// use crud_rest_provider::clients::HttpResponse;
    /// use serde_json::json;
    ///
    /// let response = HttpResponse::from_json(json!({"id": 1}));
    /// assert!(response.is_ok());
    /// assert_eq!(response.json["id"], 1);
    /// ```
    #[must_use]
    pub fn from_json(json: Value) -> Self {
        Self {
            code: 200,
            headers: HashMap::new(),
            json,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of the named header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Retry-After` header in seconds, if present and numeric.
    #[must_use]
    pub fn retry_after(&self) -> Option<f64> {
        self.header("retry-after")
            .and_then(|value| value.trim().parse::<f64>().ok())
    }

    /// Returns the error message the backend put in the body, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.json.get("message").and_then(Value::as_str)
    }
}
