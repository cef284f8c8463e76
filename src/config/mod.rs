//! Configuration types for the data provider.
//!
//! - [`ProviderConfig`]: immutable provider settings (base URL and hooks)
//! - [`ProviderConfigBuilder`]: builder for [`ProviderConfig`]
//! - [`ApiUrl`]: validated backend base URL
//!
//! # Example
//!
//! ```rust
//! use crud_rest_provider::{ApiUrl, ProviderConfig, RequestIntent};
//!
//! let config = ProviderConfig::builder()
//!     .api_url(ApiUrl::new("https://example.com/api").unwrap())
//!     .request_mutator(|intent: RequestIntent| intent)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_url().as_ref(), "https://example.com/api");
//! assert!(config.request_mutator().is_some());
//! assert!(config.response_mutator().is_none());
//! ```

mod newtypes;

pub use newtypes::ApiUrl;

use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::provider::{RequestMutator, ResponseMutator};

/// Configuration for a [`DataProvider`](crate::DataProvider).
///
/// The configuration only holds immutable values; cloning it shares the
/// mutation hooks through `Arc`.
#[derive(Clone)]
pub struct ProviderConfig {
    api_url: ApiUrl,
    request_mutator: Option<Arc<dyn RequestMutator>>,
    response_mutator: Option<Arc<dyn ResponseMutator>>,
    user_agent_prefix: Option<String>,
}

impl ProviderConfig {
    /// Creates a new builder for constructing a `ProviderConfig`.
    #[must_use]
    pub fn builder() -> ProviderConfigBuilder {
        ProviderConfigBuilder::new()
    }

    /// Returns the backend base URL.
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the request mutation hook, if configured.
    #[must_use]
    pub fn request_mutator(&self) -> Option<&dyn RequestMutator> {
        self.request_mutator.as_deref()
    }

    /// Returns the response mutation hook, if configured.
    #[must_use]
    pub fn response_mutator(&self) -> Option<&dyn ResponseMutator> {
        self.response_mutator.as_deref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_url", &self.api_url)
            .field("request_mutator", &self.request_mutator.is_some())
            .field("response_mutator", &self.response_mutator.is_some())
            .field("user_agent_prefix", &self.user_agent_prefix)
            .finish()
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProviderConfig>();
};

/// Builder for constructing [`ProviderConfig`] instances.
///
/// `api_url` is required. Both hooks default to the identity.
#[derive(Default)]
pub struct ProviderConfigBuilder {
    api_url: Option<ApiUrl>,
    request_mutator: Option<Arc<dyn RequestMutator>>,
    response_mutator: Option<Arc<dyn ResponseMutator>>,
    user_agent_prefix: Option<String>,
}

impl ProviderConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend base URL (required).
    #[must_use]
    pub fn api_url(mut self, url: ApiUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Sets the hook that may rewrite each request intent before dispatch.
    #[must_use]
    pub fn request_mutator(mut self, mutator: impl RequestMutator + 'static) -> Self {
        self.request_mutator = Some(Arc::new(mutator));
        self
    }

    /// Sets the hook that may rewrite the intent used to shape each reply.
    #[must_use]
    pub fn response_mutator(mut self, mutator: impl ResponseMutator + 'static) -> Self {
        self.response_mutator = Some(Arc::new(mutator));
        self
    }

    /// Sets the user agent prefix used by the bundled HTTP transport.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ProviderConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_url` is not set.
    pub fn build(self) -> Result<ProviderConfig, ConfigError> {
        let api_url = self
            .api_url
            .ok_or(ConfigError::MissingRequiredField { field: "api_url" })?;

        Ok(ProviderConfig {
            api_url,
            request_mutator: self.request_mutator,
            response_mutator: self.response_mutator,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

impl fmt::Debug for ProviderConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfigBuilder")
            .field("api_url", &self.api_url)
            .field("request_mutator", &self.request_mutator.is_some())
            .field("response_mutator", &self.response_mutator.is_some())
            .field("user_agent_prefix", &self.user_agent_prefix)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponse;
    use crate::provider::RequestIntent;

    fn api_url() -> ApiUrl {
        ApiUrl::new("https://test.test/api").unwrap()
    }

    #[test]
    fn test_builder_requires_api_url() {
        let result = ProviderConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_url" })
        ));
    }

    #[test]
    fn test_builder_provides_identity_defaults() {
        let config = ProviderConfig::builder().api_url(api_url()).build().unwrap();

        assert_eq!(config.api_url(), &api_url());
        assert!(config.request_mutator().is_none());
        assert!(config.response_mutator().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = ProviderConfig::builder()
            .api_url(api_url())
            .request_mutator(|intent: RequestIntent| intent)
            .response_mutator(|_: &HttpResponse, intent: RequestIntent| intent)
            .user_agent_prefix("Admin/1.0")
            .build()
            .unwrap();

        assert!(config.request_mutator().is_some());
        assert!(config.response_mutator().is_some());
        assert_eq!(config.user_agent_prefix(), Some("Admin/1.0"));
    }

    #[test]
    fn test_config_debug_hides_hooks() {
        let config = ProviderConfig::builder()
            .api_url(api_url())
            .request_mutator(|intent: RequestIntent| intent)
            .build()
            .unwrap();

        let cloned = config.clone();
        let debug_str = format!("{cloned:?}");
        assert!(debug_str.contains("ProviderConfig"));
        assert!(debug_str.contains("request_mutator: true"));
        assert!(debug_str.contains("response_mutator: false"));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProviderConfig>();
    }
}
