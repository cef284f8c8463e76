//! # CRUD REST Provider
//!
//! A data provider that maps the abstract CRUD actions of an admin
//! front-end onto a REST backend following the `crud` query conventions
//! (`filter=field||$op||value`, `sort=field,ASC`, `join=relation||a,b`,
//! `fields=a,b`, `limit`, `page`, `offset`).
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ProviderConfig`] and [`ProviderConfigBuilder`]
//! - A typed [`Action`] / [`Params`] pair for the nine CRUD intents
//! - Query composition for filters, sorting, pagination, joins and field selection
//! - Join and field parameters carried inside a resource name via [`encode_params_in_resource`]
//! - Optional request and response mutation hooks
//! - A pluggable [`Transport`] with a bundled reqwest client
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crud_rest_provider::{ApiUrl, DataProvider, ProviderConfig};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProviderConfig::builder()
//!     .api_url(ApiUrl::new("https://example.com/api")?)
//!     .build()?;
//!
//! let provider = DataProvider::with_http_client(config)?;
//!
//! let books = provider
//!     .call(
//!         "GET_LIST",
//!         "books",
//!         json!({
//!             "pagination": { "page": 1, "perPage": 10 },
//!             "sort": { "field": "year", "order": "DESC" },
//!             "filter": { "title": "dune", "year||$gte": 1965 }
//!         }),
//!     )
//!     .await?;
//!
//! println!("{} books in total", books.total.unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! ## Joins and Field Selection
//!
//! The front-end addresses collections by name only. Joins and field
//! selection travel inside that name:
//!
//! ```rust
//! use crud_rest_provider::encode_params_in_resource;
//! use crud_rest_provider::provider::IntegratedParams;
//! use crud_rest_provider::query::JoinSpec;
//!
//! let resource = encode_params_in_resource(
//!     "books",
//!     &IntegratedParams::new()
//!         .join(JoinSpec::new("author").select(["name"]))
//!         .fields(["id", "title"]),
//! );
//!
//! assert!(resource.starts_with("books_._._._"));
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes and parameters validate on construction
//! - **Thread-safe**: The provider is `Send + Sync` when its transport is
//! - **Transport-owned networking**: Retries and timeouts live in the transport

pub mod clients;
pub mod config;
pub mod error;
pub mod provider;
pub mod query;

// Re-export public types at crate root for convenience
pub use config::{ApiUrl, ProviderConfig, ProviderConfigBuilder};
pub use error::ConfigError;

pub use provider::{
    encode_params_in_resource, Action, DataProvider, Params, ProviderError, ProviderResponse,
    RecordId, RequestIntent, RequestMutator, ResponseMutator,
};

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError, Transport,
};
