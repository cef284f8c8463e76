//! Configuration error types.
//!
//! Every configuration constructor returns `Result<T, ConfigError>` so that
//! a misconfigured provider fails at construction time rather than on the
//! first request.
//!
//! # Example
//!
//! ```rust
//! use crud_rest_provider::{ApiUrl, ConfigError};
//!
//! let result = ApiUrl::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiUrl)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a provider configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API URL cannot be empty.
    #[error("API URL cannot be empty. Please provide the base URL of the backend (e.g., 'https://example.com/api').")]
    EmptyApiUrl,

    /// API URL is malformed.
    #[error("Invalid API URL '{url}'. Please provide a valid URL with scheme and host (e.g., 'https://example.com/api').")]
    InvalidApiUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
