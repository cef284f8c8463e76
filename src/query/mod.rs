//! Query-string builder for the CRUD backend.
//!
//! The backend reads filtering, sorting, pagination, relation joins and
//! field selection from the query string:
//!
//! | Parameter | Wire form |
//! |---|---|
//! | filter | `filter[i]=field\|\|$op\|\|value` |
//! | sort | `sort[i]=field,ASC` |
//! | join | `join[i]=relation\|\|a,b` |
//! | fields | `fields=a,b` |
//! | limit / page / offset | `limit=10` |
//!
//! Keys appear in the order they were first set and both keys and values
//! are percent-encoded.
//!
//! # Example
//!
//! ```rust
//! use crud_rest_provider::query::{CondOperator, QueryBuilder, QueryFilter, QuerySort, SortOrder};
//! use serde_json::json;
//!
//! let query = QueryBuilder::new()
//!     .set_filter(QueryFilter::new("year", CondOperator::GreaterThan, json!(1990)))
//!     .set_limit(10)
//!     .sort_by(&QuerySort::new("year", SortOrder::Desc))
//!     .query();
//!
//! assert_eq!(
//!     query,
//!     "filter%5B0%5D=year%7C%7C%24gt%7C%7C1990&limit=10&sort%5B0%5D=year%2CDESC"
//! );
//! ```

mod operator;

pub use operator::CondOperator;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Separates the parts of a filter or join condition.
pub const CONDITION_DELIMITER: &str = "||";

/// Separates list items inside a parameter value.
pub const LIST_DELIMITER: &str = ",";

/// Errors raised while composing a query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The operator tag is not one the backend understands.
    #[error("Invalid filter operator '{operator}'.")]
    UnknownOperator {
        /// The tag that was provided.
        operator: String,
    },
}

/// A single filter condition (`field`, `operator`, `value`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    /// The field the condition applies to; may be a dotted path.
    pub field: String,
    /// The comparison operator.
    pub operator: CondOperator,
    /// The comparison value. `Null` omits the value part on the wire.
    pub value: Value,
}

impl QueryFilter {
    /// Creates a new filter condition.
    #[must_use]
    pub fn new(field: impl Into<String>, operator: CondOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    fn to_param(&self) -> String {
        let mut param = format!("{}{CONDITION_DELIMITER}{}", self.field, self.operator);
        if !self.operator.is_unary() && !self.value.is_null() {
            param.push_str(CONDITION_DELIMITER);
            param.push_str(&render_value(&self.value));
        }
        param
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Returns `ASC` or `DESC`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sort instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySort {
    pub field: String,
    pub order: SortOrder,
}

impl QuerySort {
    /// Creates a new sort instruction.
    #[must_use]
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    fn to_param(&self) -> String {
        format!("{}{LIST_DELIMITER}{}", self.field, self.order)
    }
}

/// A relation join, optionally restricted to some of the relation's fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinSpec {
    /// The relation name; may be a dotted path for nested relations.
    pub field: String,
    /// Fields of the relation to select. `None` selects all of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<Vec<String>>,
}

impl JoinSpec {
    /// Joins `field` with all of its columns.
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            select: None,
        }
    }

    /// Restricts the join to the given columns.
    #[must_use]
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    fn to_param(&self) -> String {
        match &self.select {
            Some(select) if !select.is_empty() => format!(
                "{}{CONDITION_DELIMITER}{}",
                self.field,
                select.join(LIST_DELIMITER)
            ),
            _ => self.field.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum QueryValue {
    Single(String),
    Indexed(Vec<String>),
}

/// Chained builder producing the backend's query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryBuilder {
    params: Vec<(&'static str, QueryValue)>,
}

impl QueryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter condition.
    #[must_use]
    pub fn set_filter(mut self, filter: QueryFilter) -> Self {
        self.push_indexed("filter", filter.to_param());
        self
    }

    /// Appends every filter condition of `filters`, in order.
    #[must_use]
    pub fn set_filters(self, filters: impl IntoIterator<Item = QueryFilter>) -> Self {
        filters.into_iter().fold(self, Self::set_filter)
    }

    /// Sets the page size.
    #[must_use]
    pub fn set_limit(mut self, limit: u64) -> Self {
        self.set_single("limit", limit.to_string());
        self
    }

    /// Sets the 1-based page number.
    #[must_use]
    pub fn set_page(mut self, page: u64) -> Self {
        self.set_single("page", page.to_string());
        self
    }

    /// Sets the number of records to skip.
    #[must_use]
    pub fn set_offset(mut self, offset: u64) -> Self {
        self.set_single("offset", offset.to_string());
        self
    }

    /// Appends a sort instruction.
    #[must_use]
    pub fn sort_by(mut self, sort: &QuerySort) -> Self {
        self.push_indexed("sort", sort.to_param());
        self
    }

    /// Appends a relation join.
    #[must_use]
    pub fn set_join(mut self, join: &JoinSpec) -> Self {
        self.push_indexed("join", join.to_param());
        self
    }

    /// Restricts the returned fields. An empty selection is ignored.
    #[must_use]
    pub fn select(mut self, fields: &[String]) -> Self {
        if !fields.is_empty() {
            self.set_single("fields", fields.join(LIST_DELIMITER));
        }
        self
    }

    /// Returns `true` when nothing has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Renders the percent-encoded query string, without the leading `?`.
    #[must_use]
    pub fn query(&self) -> String {
        let mut pairs = Vec::new();
        for (name, value) in &self.params {
            match value {
                QueryValue::Single(value) => {
                    pairs.push(format!("{name}={}", urlencoding::encode(value)));
                }
                QueryValue::Indexed(values) => {
                    for (index, value) in values.iter().enumerate() {
                        let key = format!("{name}[{index}]");
                        pairs.push(format!(
                            "{}={}",
                            urlencoding::encode(&key),
                            urlencoding::encode(value)
                        ));
                    }
                }
            }
        }
        pairs.join("&")
    }

    fn set_single(&mut self, name: &'static str, value: String) {
        if let Some((_, slot)) = self.params.iter_mut().find(|(n, _)| *n == name) {
            *slot = QueryValue::Single(value);
        } else {
            self.params.push((name, QueryValue::Single(value)));
        }
    }

    fn push_indexed(&mut self, name: &'static str, value: String) {
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some((_, QueryValue::Indexed(values))) => values.push(value),
            Some((_, slot)) => *slot = QueryValue::Indexed(vec![value]),
            None => self.params.push((name, QueryValue::Indexed(vec![value]))),
        }
    }
}

/// Renders a filter value: arrays become comma-separated lists, strings are
/// used verbatim, anything else uses its JSON text.
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(LIST_DELIMITER),
        other => other.to_string(),
    }
}
