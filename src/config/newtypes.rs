//! Validated newtype wrappers for configuration values.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated base URL of the CRUD backend.
///
/// The URL must carry a scheme and a non-empty host. A trailing `/` is
/// trimmed so that resource URLs are always built as `{api}/{resource}`.
///
/// # Example
///
/// ```rust
/// use crud_rest_provider::ApiUrl;
///
/// let url = ApiUrl::new("https://example.com/api/").unwrap();
/// assert_eq!(url.as_ref(), "https://example.com/api");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "example.com");
/// assert_eq!(url.resource_url("books"), "https://example.com/api/books");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl ApiUrl {
    /// Creates a new validated API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiUrl`] for an empty string and
    /// [`ConfigError::InvalidApiUrl`] when the scheme or host is missing.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        if url.is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidApiUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidApiUrl { url });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidApiUrl { url });
        }

        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidApiUrl { url });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Returns `{api}/{resource}`.
    #[must_use]
    pub fn resource_url(&self, resource: &str) -> String {
        format!("{}/{resource}", self.url)
    }

    /// Returns `{api}/{resource}/{id}`.
    #[must_use]
    pub fn record_url(&self, resource: &str, id: impl fmt::Display) -> String {
        format!("{}/{resource}/{id}", self.url)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
