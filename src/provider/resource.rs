//! Join and field-selection parameters carried inside a resource name.
//!
//! The front-end addresses a collection by a single string. To request
//! relation joins or a field selection for it, the parameters are appended
//! to the name as JSON after [`RESOURCE_PARAMS_SEPARATOR`]:
//!
//! ```text
//! books_._._._{"join":[{"field":"author"}],"fields":["id","title"]}
//! ```
//!
//! A JSON value that itself contains the separator does not survive the
//! round trip; the payload is split at the first occurrence.

use serde::{Deserialize, Serialize};

use crate::query::JoinSpec;

/// Separates the real resource name from its JSON parameters.
pub const RESOURCE_PARAMS_SEPARATOR: &str = "_._._._";

/// Join and field selection requested for a resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegratedParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join: Option<Vec<JoinSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl IntegratedParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a relation join.
    #[must_use]
    pub fn join(mut self, join: JoinSpec) -> Self {
        self.join.get_or_insert_with(Vec::new).push(join);
        self
    }

    /// Sets the field selection.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }
}

/// Appends `params` to `resource` so that [`ResourceRef::parse`] can
/// recover them.
///
/// # Example
///
/// ```rust
/// use crud_rest_provider::encode_params_in_resource;
/// use crud_rest_provider::provider::{IntegratedParams, ResourceRef};
///
/// let params = IntegratedParams::new().fields(["id", "title"]);
/// let resource = encode_params_in_resource("books", &params);
/// assert_eq!(resource, r#"books_._._._{"fields":["id","title"]}"#);
///
/// let parsed = ResourceRef::parse(&resource);
/// assert_eq!(parsed.real_resource, "books");
/// assert_eq!(parsed.integrated_params, Some(params));
/// ```
#[must_use]
pub fn encode_params_in_resource(resource: &str, params: &IntegratedParams) -> String {
    // Only strings and string lists; serialization cannot fail.
    let json = serde_json::to_string(params).unwrap_or_else(|_| "{}".to_string());
    format!("{resource}{RESOURCE_PARAMS_SEPARATOR}{json}")
}

/// A decoded resource name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceRef {
    /// The backend collection name.
    pub real_resource: String,
    /// Parameters carried by the name, if any were present and valid.
    pub integrated_params: Option<IntegratedParams>,
}

impl ResourceRef {
    /// Splits `raw` into the collection name and its parameters.
    ///
    /// Never fails: a payload that is not valid JSON for
    /// [`IntegratedParams`] is logged and dropped.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let Some((real_resource, payload)) = raw.split_once(RESOURCE_PARAMS_SEPARATOR) else {
            return Self {
                real_resource: raw.to_string(),
                integrated_params: None,
            };
        };

        let integrated_params = match serde_json::from_str::<IntegratedParams>(payload) {
            Ok(params) => Some(params),
            Err(error) => {
                tracing::warn!(
                    real_resource,
                    params = payload,
                    %error,
                    "ignoring unparseable resource parameters"
                );
                None
            }
        };

        Self {
            real_resource: real_resource.to_string(),
            integrated_params,
        }
    }

    /// Returns the relation joins, or an empty slice.
    #[must_use]
    pub fn joins(&self) -> &[JoinSpec] {
        self.integrated_params
            .as_ref()
            .and_then(|params| params.join.as_deref())
            .unwrap_or_default()
    }

    /// Returns the field selection, or an empty slice.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        self.integrated_params
            .as_ref()
            .and_then(|params| params.fields.as_deref())
            .unwrap_or_default()
    }
}
