//! Condition: a typed predicate over one device property.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Operator;
use crate::error::MalformedEntityError;
use crate::id::DeviceId;

/// A predicate that must hold for a rule to match an event.
///
/// The variant is chosen once, from the shape of the value supplied in
/// the rule definition, and decides which field of an
/// [`Event`](crate::event::Event) the condition reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Condition {
    /// Compares the event boolean value.
    Boolean {
        device_id: DeviceId,
        property: String,
        operator: Operator,
        value: bool,
    },
    /// Compares the event string value.
    String {
        device_id: DeviceId,
        property: String,
        operator: Operator,
        value: String,
    },
    /// Compares the event numeric value with a threshold.
    Numeric {
        device_id: DeviceId,
        property: String,
        operator: Operator,
        value: f64,
    },
    /// Checks the event numeric value lies in `[from, to]`.
    Between {
        device_id: DeviceId,
        property: String,
        from: f64,
        to: f64,
    },
}

/// The closed set of condition value shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    Boolean,
    String,
    Numeric,
    Between,
}

impl ConditionKind {
    /// Human readable name of the value shape.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Numeric => "numeric",
            Self::Between => "range",
        }
    }
}

impl Condition {
    /// Device whose telemetry this condition observes.
    #[must_use]
    pub fn device_id(&self) -> DeviceId {
        match self {
            Self::Boolean { device_id, .. }
            | Self::String { device_id, .. }
            | Self::Numeric { device_id, .. }
            | Self::Between { device_id, .. } => *device_id,
        }
    }

    /// Name of the observed property.
    #[must_use]
    pub fn property(&self) -> &str {
        match self {
            Self::Boolean { property, .. }
            | Self::String { property, .. }
            | Self::Numeric { property, .. }
            | Self::Between { property, .. } => property,
        }
    }

    /// Operator applied by this condition. Ranges always use [`Operator::Between`].
    #[must_use]
    pub fn operator(&self) -> Operator {
        match self {
            Self::Boolean { operator, .. }
            | Self::String { operator, .. }
            | Self::Numeric { operator, .. } => *operator,
            Self::Between { .. } => Operator::Between,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ConditionKind {
        match self {
            Self::Boolean { .. } => ConditionKind::Boolean,
            Self::String { .. } => ConditionKind::String,
            Self::Numeric { .. } => ConditionKind::Numeric,
            Self::Between { .. } => ConditionKind::Between,
        }
    }

    /// Check the condition invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`MalformedEntityError`] when the property is empty, the
    /// operator is undefined or does not fit the value kind, or a range is
    /// not strictly increasing.
    pub fn validate(&self) -> Result<(), MalformedEntityError> {
        if self.property().is_empty() {
            return Err(MalformedEntityError::EmptyField("property"));
        }
        let operator = self.operator();
        if operator == Operator::Undefined {
            return Err(MalformedEntityError::UndefinedOperator);
        }
        let kind = self.kind();
        if !operator.accepts(kind) {
            return Err(MalformedEntityError::IncompatibleOperator {
                operator,
                kind: kind.name(),
            });
        }
        if let Self::Between { from, to, .. } = self
            && !(from.is_finite() && to.is_finite() && from < to)
        {
            return Err(MalformedEntityError::InvalidRange {
                from: *from,
                to: *to,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean {
                device_id,
                property,
                operator,
                value,
            } => write!(f, "{device_id}.{property} {operator} {value}"),
            Self::String {
                device_id,
                property,
                operator,
                value,
            } => write!(f, "{device_id}.{property} {operator} {value:?}"),
            Self::Numeric {
                device_id,
                property,
                operator,
                value,
            } => write!(f, "{device_id}.{property} {operator} {value}"),
            Self::Between {
                device_id,
                property,
                from,
                to,
            } => write!(f, "{device_id}.{property} BETWEEN {from} AND {to}"),
        }
    }
}
