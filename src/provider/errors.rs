//! Provider error types.
//!
//! - [`ProviderError::UnsupportedAction`]: the action tag is not one of the nine CRUD intents
//! - [`ProviderError::InvalidParams`]: the parameter bag does not fit the action
//! - [`ProviderError::Query`]: a filter could not be composed
//! - [`ProviderError::Http`]: the transport failed; passed through unchanged
//!
//! # Example
//!
//! ```rust,ignore
//! use crud_rest_provider::ProviderError;
//!
//! match provider.call("GET_ALL", "books", params).await {
//!     Err(ProviderError::UnsupportedAction { action }) => println!("unknown action {action}"),
//!     Err(ProviderError::Http(e)) => println!("backend failed: {e}"),
//!     Err(e) => println!("{e}"),
//!     Ok(response) => println!("{}", response.data),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::provider::Action;
use crate::query::QueryError;

/// Error type for provider calls.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The action tag is not supported.
    #[error("Unsupported fetch action type {action}")]
    UnsupportedAction {
        /// The offending action tag.
        action: String,
    },

    /// The parameters do not have the shape the action requires.
    #[error("Invalid parameters for {action}: {source}")]
    InvalidParams {
        /// The action the parameters were meant for.
        action: Action,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A filter could not be turned into query conditions.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The transport failed.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ProviderError {
    /// Returns the HTTP status code when the transport failed on a reply.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}
