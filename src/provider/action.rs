//! CRUD actions and their parameters.
//!
//! [`Action`] is the tag the front-end issues; [`Params`] is the sum type
//! carrying each action's typed parameters. A `Params` value always knows
//! its own action, so a request can never pair a tag with the wrong shape.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::provider::ProviderError;
use crate::query::QuerySort;

/// One of the nine abstract CRUD intents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Paginated, filtered, sorted list of a collection.
    GetList,
    /// A single record by id.
    GetOne,
    /// Several records by id.
    GetMany,
    /// Paginated list of records pointing at another record.
    GetManyReference,
    Create,
    Update,
    /// The same change applied to several records, one request each.
    UpdateMany,
    Delete,
    /// Several records deleted, one request each.
    DeleteMany,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::GetList,
        Self::GetOne,
        Self::GetMany,
        Self::GetManyReference,
        Self::Create,
        Self::Update,
        Self::UpdateMany,
        Self::Delete,
        Self::DeleteMany,
    ];

    /// Returns the front-end tag (e.g. `GET_LIST`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GetList => "GET_LIST",
            Self::GetOne => "GET_ONE",
            Self::GetMany => "GET_MANY",
            Self::GetManyReference => "GET_MANY_REFERENCE",
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::UpdateMany => "UPDATE_MANY",
            Self::Delete => "DELETE",
            Self::DeleteMany => "DELETE_MANY",
        }
    }

    /// Returns the camel-case method name (e.g. `getList`).
    #[must_use]
    pub const fn method_name(&self) -> &'static str {
        match self {
            Self::GetList => "getList",
            Self::GetOne => "getOne",
            Self::GetMany => "getMany",
            Self::GetManyReference => "getManyReference",
            Self::Create => "create",
            Self::Update => "update",
            Self::UpdateMany => "updateMany",
            Self::Delete => "delete",
            Self::DeleteMany => "deleteMany",
        }
    }

    /// Returns `true` for the actions that fan out to one request per id.
    #[must_use]
    pub const fn is_bulk(&self) -> bool {
        matches!(self, Self::UpdateMany | Self::DeleteMany)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses either the tag (`GET_LIST`) or the method name (`getList`).
impl FromStr for Action {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s || action.method_name() == s)
            .ok_or_else(|| ProviderError::UnsupportedAction {
                action: s.to_string(),
            })
    }
}

/// A record identifier: a JSON number or a string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(serde_json::Number),
    Text(String),
}

impl RecordId {
    /// Returns the identifier as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::Number(n.clone()),
            Self::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Page request; `page` is 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

impl Pagination {
    /// Creates a page request.
    #[must_use]
    pub const fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }
    }

    /// Number of records before this page, `(page - 1) * per_page`.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

/// Parameters of [`Action::GetList`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub pagination: Pagination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<QuerySort>,
    /// Nested filter object, composed into filter conditions.
    #[serde(default)]
    pub filter: Value,
}

/// Parameters of [`Action::GetOne`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetOneParams {
    pub id: RecordId,
}

/// Parameters of [`Action::GetMany`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetManyParams {
    pub ids: Vec<RecordId>,
}

/// Parameters of [`Action::GetManyReference`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetManyReferenceParams {
    /// The field of this resource that references the other record.
    pub target: String,
    /// The referenced record's id.
    pub id: RecordId,
    pub pagination: Pagination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<QuerySort>,
    #[serde(default)]
    pub filter: Value,
}

/// Parameters of [`Action::Create`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateParams {
    pub data: Value,
}

/// Parameters of [`Action::Update`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateParams {
    pub id: RecordId,
    pub data: Value,
}

/// Parameters of [`Action::UpdateMany`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateManyParams {
    pub ids: Vec<RecordId>,
    pub data: Value,
}

/// Parameters of [`Action::Delete`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteParams {
    pub id: RecordId,
}

/// Parameters of [`Action::DeleteMany`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteManyParams {
    pub ids: Vec<RecordId>,
}

/// An action together with its parameters.
///
/// # Example
///
/// ```rust
/// use crud_rest_provider::provider::{Action, Params};
/// use serde_json::json;
///
/// let params = Params::from_value(Action::GetOne, json!({"id": "5"})).unwrap();
/// assert_eq!(params.action(), Action::GetOne);
///
/// assert!(Params::from_value(Action::GetOne, json!({"ids": [1]})).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Params {
    GetList(ListParams),
    GetOne(GetOneParams),
    GetMany(GetManyParams),
    GetManyReference(GetManyReferenceParams),
    Create(CreateParams),
    Update(UpdateParams),
    UpdateMany(UpdateManyParams),
    Delete(DeleteParams),
    DeleteMany(DeleteManyParams),
}

impl Params {
    /// Returns the action these parameters belong to.
    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::GetList(_) => Action::GetList,
            Self::GetOne(_) => Action::GetOne,
            Self::GetMany(_) => Action::GetMany,
            Self::GetManyReference(_) => Action::GetManyReference,
            Self::Create(_) => Action::Create,
            Self::Update(_) => Action::Update,
            Self::UpdateMany(_) => Action::UpdateMany,
            Self::Delete(_) => Action::Delete,
            Self::DeleteMany(_) => Action::DeleteMany,
        }
    }

    /// Deserializes the front-end's untyped parameter bag for `action`.
    ///
    /// Unknown keys (e.g. `previousData`) are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidParams`] when `value` lacks a field
    /// the action requires or a field has the wrong type.
    pub fn from_value(action: Action, value: Value) -> Result<Self, ProviderError> {
        let invalid = |source| ProviderError::InvalidParams { action, source };
        let params = match action {
            Action::GetList => Self::GetList(serde_json::from_value(value).map_err(invalid)?),
            Action::GetOne => Self::GetOne(serde_json::from_value(value).map_err(invalid)?),
            Action::GetMany => Self::GetMany(serde_json::from_value(value).map_err(invalid)?),
            Action::GetManyReference => {
                Self::GetManyReference(serde_json::from_value(value).map_err(invalid)?)
            }
            Action::Create => Self::Create(serde_json::from_value(value).map_err(invalid)?),
            Action::Update => Self::Update(serde_json::from_value(value).map_err(invalid)?),
            Action::UpdateMany => {
                Self::UpdateMany(serde_json::from_value(value).map_err(invalid)?)
            }
            Action::Delete => Self::Delete(serde_json::from_value(value).map_err(invalid)?),
            Action::DeleteMany => {
                Self::DeleteMany(serde_json::from_value(value).map_err(invalid)?)
            }
        };
        Ok(params)
    }
}

impl From<ListParams> for Params {
    fn from(params: ListParams) -> Self {
        Self::GetList(params)
    }
}

impl From<GetOneParams> for Params {
    fn from(params: GetOneParams) -> Self {
        Self::GetOne(params)
    }
}

impl From<GetManyParams> for Params {
    fn from(params: GetManyParams) -> Self {
        Self::GetMany(params)
    }
}

impl From<GetManyReferenceParams> for Params {
    fn from(params: GetManyReferenceParams) -> Self {
        Self::GetManyReference(params)
    }
}

impl From<CreateParams> for Params {
    fn from(params: CreateParams) -> Self {
        Self::Create(params)
    }
}

impl From<UpdateParams> for Params {
    fn from(params: UpdateParams) -> Self {
        Self::Update(params)
    }
}

impl From<UpdateManyParams> for Params {
    fn from(params: UpdateManyParams) -> Self {
        Self::UpdateMany(params)
    }
}

impl From<DeleteParams> for Params {
    fn from(params: DeleteParams) -> Self {
        Self::Delete(params)
    }
}

impl From<DeleteManyParams> for Params {
    fn from(params: DeleteManyParams) -> Self {
        Self::DeleteMany(params)
    }
}
