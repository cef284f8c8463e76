//! The provider entry point.

use futures_util::future::try_join_all;
use serde_json::Value;

use crate::clients::{HttpClient, HttpError, Transport};
use crate::config::ProviderConfig;
use crate::provider::request::{convert_request, Dispatch};
use crate::provider::resource::ResourceRef;
use crate::provider::response::{aggregate_responses, convert_response, ProviderResponse};
use crate::provider::{Action, Params, ProviderError, RequestIntent};

/// Adapts CRUD actions to a crud-convention REST backend.
///
/// The provider holds only its configuration and transport; calls share no
/// mutable state and may run concurrently.
///
/// # Example
///
/// ```rust
/// use crud_rest_provider::clients::{HttpError, HttpRequest, HttpResponse};
/// use crud_rest_provider::{ApiUrl, DataProvider, ProviderConfig};
/// use serde_json::json;
///
/// let config = ProviderConfig::builder()
///     .api_url(ApiUrl::new("https://test.test/api").unwrap())
///     .build()
///     .unwrap();
///
/// let transport = |_: HttpRequest| async {
///     Ok::<_, HttpError>(HttpResponse::from_json(json!({ "id": 1 })))
/// };
/// let provider = DataProvider::new(config, transport);
///
/// # tokio_test::block_on(async {
/// let response = provider
///     .call("CREATE", "books", json!({ "data": { "name": "x" } }))
///     .await
///     .unwrap();
/// assert_eq!(response.data, json!({ "name": "x", "id": 1 }));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct DataProvider<T = HttpClient> {
    config: ProviderConfig,
    transport: T,
}

impl DataProvider<HttpClient> {
    /// Creates a provider backed by the bundled reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn with_http_client(config: ProviderConfig) -> Result<Self, HttpError> {
        let client = HttpClient::new(Some(&config))?;
        Ok(Self::new(config, client))
    }
}

impl<T: Transport> DataProvider<T> {
    /// Creates a provider sending its requests through `transport`.
    #[must_use]
    pub const fn new(config: ProviderConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Returns the provider configuration.
    #[must_use]
    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs the action described by `params` on `resource`.
    ///
    /// `resource` may carry join and field parameters added with
    /// [`encode_params_in_resource`](crate::encode_params_in_resource). The
    /// request hook sees the bare resource name; URLs are always built from
    /// `resource` as given.
    ///
    /// Bulk actions send one request per id concurrently and fail as a
    /// whole if any of them fails. The response hook is not applied to them.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Query`] if a filter names an unknown
    /// operator, and [`ProviderError::Http`] with the transport's error
    /// unchanged if a request fails.
    pub async fn execute(
        &self,
        resource: &str,
        params: Params,
    ) -> Result<ProviderResponse, ProviderError> {
        let decoded = ResourceRef::parse(resource);
        let mut intent = RequestIntent::new(decoded.real_resource, params);
        if let Some(mutator) = self.config.request_mutator() {
            intent = mutator.mutate_request(intent);
        }

        let action = intent.action();
        match convert_request(self.config.api_url(), resource, &intent.params)? {
            Dispatch::FanOut(requests) => {
                tracing::debug!(
                    %action,
                    bulk = action.is_bulk(),
                    resource = %intent.resource,
                    requests = requests.len(),
                    "dispatching bulk action"
                );
                let responses =
                    try_join_all(requests.into_iter().map(|request| self.transport.fetch(request)))
                        .await?;
                Ok(aggregate_responses(responses))
            }
            Dispatch::Single(request) => {
                tracing::debug!(
                    %action,
                    bulk = action.is_bulk(),
                    resource = %intent.resource,
                    method = %request.method,
                    url = %request.url,
                    "dispatching action"
                );
                let response = self.transport.fetch(request).await?;
                if let Some(mutator) = self.config.response_mutator() {
                    intent = mutator.mutate_response(&response, intent);
                }
                Ok(convert_response(&response, &intent.params))
            }
        }
    }

    /// Performs an action given by its tag (`GET_LIST`) or method name
    /// (`getList`) with an untyped parameter bag.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnsupportedAction`] naming an unknown tag,
    /// [`ProviderError::InvalidParams`] if `params` does not fit the action,
    /// and any error of [`execute`](Self::execute).
    pub async fn call(
        &self,
        action: &str,
        resource: &str,
        params: Value,
    ) -> Result<ProviderResponse, ProviderError> {
        let action: Action = action.parse()?;
        let params = Params::from_value(action, params)?;
        self.execute(resource, params).await
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DataProvider>();
};
