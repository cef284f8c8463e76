//! Turns the front-end's nested filter object into filter conditions.
//!
//! Keys may carry an operator after `||` (`"year||$gte"`); without one the
//! condition is a substring match. A field written as `_relation.column`
//! addresses a column of a joined relation whose bare name would clash with
//! a reserved key; the leading `_` is dropped.

use serde_json::{Map, Value};

use crate::query::{CondOperator, QueryError, QueryFilter, CONDITION_DELIMITER};

/// Flattens nested objects into dot-delimited keys.
///
/// Arrays and scalars are leaves. Empty nested objects and non-object
/// roots produce nothing.
#[must_use]
pub fn flatten_filter(filter: &Value) -> Vec<(String, Value)> {
    let mut flat = Vec::new();
    if let Value::Object(map) = filter {
        flatten_into(None, map, &mut flat);
    }
    flat
}

fn flatten_into(prefix: Option<&str>, map: &Map<String, Value>, flat: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        let path = prefix.map_or_else(|| key.clone(), |prefix| format!("{prefix}.{key}"));
        match value {
            Value::Object(nested) => flatten_into(Some(path.as_str()), nested, flat),
            leaf => flat.push((path, leaf.clone())),
        }
    }
}

/// A parsed filter key: the field and its comparison operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterKey {
    pub field: String,
    pub operator: CondOperator,
}

impl FilterKey {
    /// Parses `field` or `field||operator`.
    ///
    /// Segments after the operator are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownOperator`] if the operator part is not
    /// a known operator tag.
    pub fn parse(key: &str) -> Result<Self, QueryError> {
        let mut segments = key.split(CONDITION_DELIMITER);
        let field = segments.next().unwrap_or(key);
        let operator = match segments.next() {
            Some(operator) if !operator.is_empty() => operator.parse()?,
            _ => CondOperator::default(),
        };

        Ok(Self {
            field: unescape_field(field).to_string(),
            operator,
        })
    }
}

// `_author.name` -> `author.name`
fn unescape_field(field: &str) -> &str {
    match field.strip_prefix('_') {
        Some(rest) if rest.contains('.') => rest,
        _ => field,
    }
}

/// Composes filter conditions from a nested filter object.
///
/// # Errors
///
/// Returns [`QueryError::UnknownOperator`] if any key names an unknown
/// operator.
///
/// # Example
///
/// ```rust
/// use crud_rest_provider::provider::compose_filter;
/// use crud_rest_provider::query::CondOperator;
/// use serde_json::json;
///
/// let filters = compose_filter(&json!({
///     "_author": { "name": "frank" },
///     "title": "dune",
///     "year||$gte": 1965
/// }))
/// .unwrap();
///
/// assert_eq!(filters[0].field, "author.name");
/// assert_eq!(filters[1].operator, CondOperator::Contains);
/// assert_eq!(filters[2].operator, CondOperator::GreaterThanEquals);
/// ```
pub fn compose_filter(filter: &Value) -> Result<Vec<QueryFilter>, QueryError> {
    flatten_filter(filter)
        .into_iter()
        .map(|(key, value)| {
            let key = FilterKey::parse(&key)?;
            Ok(QueryFilter::new(key.field, key.operator, value))
        })
        .collect()
}
