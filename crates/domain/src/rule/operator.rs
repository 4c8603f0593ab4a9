//! Operator: how a condition compares its stored value with an observed one.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::condition::ConditionKind;
use crate::error::MalformedEntityError;

/// Comparison operator carried by a [`Condition`](super::Condition).
///
/// [`Operator::Undefined`] is the zero value only: it has no textual
/// encoding and is never valid on a stored condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Operator {
    #[default]
    Undefined,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    Between,
}

impl Operator {
    /// Every operator that has a textual encoding.
    pub const DEFINED: [Self; 7] = [
        Self::Eq,
        Self::Neq,
        Self::Lt,
        Self::Lte,
        Self::Gt,
        Self::Gte,
        Self::Between,
    ];

    /// Canonical textual encoding, `None` for [`Operator::Undefined`].
    #[must_use]
    pub fn encoding(self) -> Option<&'static str> {
        match self {
            Self::Undefined => None,
            Self::Eq => Some("="),
            Self::Neq => Some("!="),
            Self::Lt => Some("<"),
            Self::Lte => Some("<="),
            Self::Gt => Some(">"),
            Self::Gte => Some(">="),
            Self::Between => Some("BETWEEN"),
        }
    }

    /// Compare the condition value (`expected`) with an observed value (`actual`).
    ///
    /// Ordering operators read as `expected <op> actual`: `Lt` with an
    /// expected value of `15.0` holds for any actual value above 15.
    /// `Between` and `Undefined` never hold here; ranges go through
    /// [`Operator::compare_range`].
    #[must_use]
    pub fn compare<T: PartialOrd + ?Sized>(self, expected: &T, actual: &T) -> bool {
        match self {
            Self::Eq => expected == actual,
            Self::Neq => expected != actual,
            Self::Lt => expected < actual,
            Self::Lte => expected <= actual,
            Self::Gt => expected > actual,
            Self::Gte => expected >= actual,
            Self::Between | Self::Undefined => false,
        }
    }

    /// Inclusive range check, only meaningful for [`Operator::Between`].
    #[must_use]
    pub fn compare_range(self, from: f64, to: f64, actual: f64) -> bool {
        matches!(self, Self::Between) && from <= actual && actual <= to
    }

    /// Whether this operator can be applied to a condition of the given kind.
    #[must_use]
    pub fn accepts(self, kind: ConditionKind) -> bool {
        match (self, kind) {
            (Self::Undefined, _) => false,
            (Self::Eq | Self::Neq, _) => kind != ConditionKind::Between,
            (_, ConditionKind::Boolean | ConditionKind::String) => false,
            (Self::Between, ConditionKind::Numeric) => false,
            (Self::Between, ConditionKind::Between) => true,
            (_, ConditionKind::Numeric) => true,
            (_, ConditionKind::Between) => false,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encoding().unwrap_or("UNDEFINED"))
    }
}

impl FromStr for Operator {
    type Err = MalformedEntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::DEFINED
            .into_iter()
            .find(|op| op.encoding() == Some(s))
            .ok_or_else(|| MalformedEntityError::UnknownOperator(s.to_string()))
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.encoding() {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = Option::<String>::deserialize(deserializer)?
            .ok_or_else(|| D::Error::custom(MalformedEntityError::UndefinedOperator))?;
        text.parse().map_err(D::Error::custom)
    }
}
