//! reqwest-backed transport.
//!
//! [`HttpClient`] is the default [`Transport`]: it sends JSON requests,
//! decodes JSON replies and maps non-2xx replies to [`HttpError::Response`].
//! Retries are owned here, never by the provider.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::Transport;
use crate::config::ProviderConfig;

/// Fixed retry wait time in seconds for 5xx replies and 429 replies without `Retry-After`.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP transport built on `reqwest`.
///
/// The client handles:
/// - Default headers (`Accept`, `User-Agent`, optional `Authorization`)
/// - `Content-Type: application/json` for requests that carry a body
/// - JSON decoding of the reply body
/// - Optional retries for 429 and 5xx replies (disabled by default)
///
/// # Example
///
/// ```rust
/// use crud_rest_provider::clients::HttpClient;
///
/// let client = HttpClient::new(None)
///     .unwrap()
///     .with_bearer_token("secret-token")
///     .with_tries(3);
///
/// assert_eq!(client.tries(), 3);
/// assert_eq!(
///     client.default_headers().get("Authorization"),
///     Some(&"Bearer secret-token".to_string())
/// );
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    default_headers: HashMap<String, String>,
    tries: u32,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new client, taking the user agent prefix from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: Option<&ProviderConfig>) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .and_then(ProviderConfig::user_agent_prefix)
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}CRUD REST Provider v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            default_headers,
            tries: 1,
        })
    }

    /// Sends `Authorization: Bearer {token}` with every request.
    #[must_use]
    pub fn with_bearer_token(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.with_header("Authorization", value)
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Sets how many times a request is attempted (default 1, no retries).
    ///
    /// Values below 1 are treated as 1.
    #[must_use]
    pub fn with_tries(mut self, tries: u32) -> Self {
        self.tries = tries.max(1);
        self
    }

    /// Returns the configured number of attempts.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends `request` and decodes the reply.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error occurs (`Network`)
    /// - A non-2xx reply is received (`Response`)
    /// - Retries are exhausted (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = self
                .client
                .request(Self::reqwest_method(request.method), &request.url);
            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }
            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.clone());
            }

            tracing::debug!(method = %request.method, url = %request.url, attempt = tries, "sending request");

            let res = req_builder.send().await?;

            let status = res.status();
            let code = status.as_u16();
            let reason = status.canonical_reason().unwrap_or("Unknown Status");
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();

            let json = if body_text.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&body_text).unwrap_or(Value::Null)
            };

            let response = HttpResponse::new(code, res_headers, json);
            if response.is_ok() {
                return Ok(response);
            }

            let message = response
                .error_message()
                .map_or_else(|| reason.to_string(), String::from);

            let should_retry = code == 429 || code >= 500;
            if !should_retry {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message,
                    body: response.json,
                }));
            }

            if tries >= self.tries {
                if self.tries == 1 {
                    return Err(HttpError::Response(HttpResponseError {
                        code,
                        message,
                        body: response.json,
                    }));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: self.tries,
                    message,
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::warn!(
                url = %request.url,
                code,
                attempt = tries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "retryable response, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn reqwest_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    // 429 honours Retry-After; 5xx always waits the fixed delay.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> Duration {
        if status == 429 {
            if let Some(retry_after) = response.retry_after() {
                if retry_after.is_finite() && retry_after >= 0.0 {
                    return Duration::from_secs_f64(retry_after);
                }
            }
        }
        Duration::from_secs(RETRY_WAIT_TIME)
    }
}

impl Transport for HttpClient {
    fn fetch(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        self.request(request)
    }
}
