//! Comparison operators understood by the backend's `filter` parameter.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::query::QueryError;

/// A filter comparison operator.
///
/// Each operator has a wire tag (e.g. `$cont`). The `...Low` variants are
/// the case-insensitive forms (`$contL`, …).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CondOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LowerThan,
    GreaterThanEquals,
    LowerThanEquals,
    Starts,
    Ends,
    /// Substring match, the default operator for composed filters.
    #[default]
    Contains,
    Excludes,
    In,
    NotIn,
    IsNull,
    NotNull,
    Between,
    EqualsLow,
    NotEqualsLow,
    StartsLow,
    EndsLow,
    ContainsLow,
    ExcludesLow,
    InLow,
    NotInLow,
}

impl CondOperator {
    /// Every operator, in declaration order.
    pub const ALL: [Self; 23] = [
        Self::Equals,
        Self::NotEquals,
        Self::GreaterThan,
        Self::LowerThan,
        Self::GreaterThanEquals,
        Self::LowerThanEquals,
        Self::Starts,
        Self::Ends,
        Self::Contains,
        Self::Excludes,
        Self::In,
        Self::NotIn,
        Self::IsNull,
        Self::NotNull,
        Self::Between,
        Self::EqualsLow,
        Self::NotEqualsLow,
        Self::StartsLow,
        Self::EndsLow,
        Self::ContainsLow,
        Self::ExcludesLow,
        Self::InLow,
        Self::NotInLow,
    ];

    /// Returns the wire tag, including the leading `$`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "$eq",
            Self::NotEquals => "$ne",
            Self::GreaterThan => "$gt",
            Self::LowerThan => "$lt",
            Self::GreaterThanEquals => "$gte",
            Self::LowerThanEquals => "$lte",
            Self::Starts => "$starts",
            Self::Ends => "$ends",
            Self::Contains => "$cont",
            Self::Excludes => "$excl",
            Self::In => "$in",
            Self::NotIn => "$notin",
            Self::IsNull => "$isnull",
            Self::NotNull => "$notnull",
            Self::Between => "$between",
            Self::EqualsLow => "$eqL",
            Self::NotEqualsLow => "$neL",
            Self::StartsLow => "$startsL",
            Self::EndsLow => "$endsL",
            Self::ContainsLow => "$contL",
            Self::ExcludesLow => "$exclL",
            Self::InLow => "$inL",
            Self::NotInLow => "$notinL",
        }
    }

    /// Returns `true` for operators that take no value.
    #[must_use]
    pub const fn is_unary(&self) -> bool {
        matches!(self, Self::IsNull | Self::NotNull)
    }
}

impl fmt::Display for CondOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a wire tag. The leading `$` is optional (`cont` == `$cont`).
impl FromStr for CondOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        let bare = tag.strip_prefix('$').unwrap_or(tag);
        Self::ALL
            .into_iter()
            .find(|op| &op.as_str()[1..] == bare)
            .ok_or_else(|| QueryError::UnknownOperator {
                operator: s.to_string(),
            })
    }
}

impl Serialize for CondOperator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CondOperator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
