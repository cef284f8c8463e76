//! CRUD actions mapped onto the REST backend.
//!
//! A call flows through these steps:
//!
//! 1. The resource name is decoded ([`ResourceRef::parse`]).
//! 2. The [`RequestMutator`] may rewrite the [`RequestIntent`].
//! 3. [`convert_request`] builds one request, or one per id for bulk actions.
//! 4. The [`Transport`](crate::clients::Transport) executes them.
//! 5. The [`ResponseMutator`] may rewrite the intent (single requests only).
//! 6. [`convert_response`] shapes the reply into a [`ProviderResponse`].

mod action;
mod data_provider;
mod errors;
mod filter;
mod hooks;
mod request;
mod resource;
mod response;

pub use action::{
    Action, CreateParams, DeleteManyParams, DeleteParams, GetManyParams, GetManyReferenceParams,
    GetOneParams, ListParams, Pagination, Params, RecordId, UpdateManyParams, UpdateParams,
};
pub use data_provider::DataProvider;
pub use errors::ProviderError;
pub use filter::{compose_filter, flatten_filter, FilterKey};
pub use hooks::{RequestIntent, RequestMutator, ResponseMutator};
pub use request::{convert_request, Dispatch};
pub use resource::{
    encode_params_in_resource, IntegratedParams, ResourceRef, RESOURCE_PARAMS_SEPARATOR,
};
pub use response::{aggregate_responses, convert_response, ProviderResponse};
