//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`RuleKeeperError`] via `#[from]`.

use crate::rule::Operator;

/// Top-level error shared by the domain, the application layer and adapters.
#[derive(Debug, thiserror::Error)]
pub enum RuleKeeperError {
    /// A rule payload or a rule failed validation.
    #[error("malformed entity specification: {0}")]
    MalformedEntity(#[from] MalformedEntityError),

    /// An identifier supplied from outside is not UUID-shaped.
    #[error("malformed identifier: {0}")]
    MalformedIdentifier(#[from] MalformedIdentifierError),

    /// A lookup found nothing.
    #[error("non-existent entity: {0}")]
    NotFound(#[from] NotFoundError),

    /// Opaque failure reported by a storage adapter.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Why a rule definition (or a rule built in code) was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedEntityError {
    /// The payload is not valid JSON or does not have the expected shape.
    #[error("payload cannot be decoded: {0}")]
    Decode(String),

    /// A required field is absent (or `null`).
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A string field that must not be empty is empty.
    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),

    /// An identifier field is not UUID-shaped.
    #[error("field `{0}` is not a valid identifier")]
    InvalidIdentifier(&'static str),

    /// A rule without conditions.
    #[error("rule must have at least one condition")]
    NoConditions,

    /// A rule without actions.
    #[error("rule must have at least one action")]
    NoActions,

    /// The operator text is not one of the known encodings.
    #[error("unknown operator `{0}`")]
    UnknownOperator(String),

    /// A condition carries the [`Operator::Undefined`] sentinel.
    #[error("operator is undefined")]
    UndefinedOperator,

    /// The operator cannot be applied to the condition value.
    #[error("operator `{operator}` cannot be used with a {kind} value")]
    IncompatibleOperator {
        operator: Operator,
        kind: &'static str,
    },

    /// A range whose lower bound is not strictly below its upper bound.
    #[error("range lower bound {from} must be below upper bound {to}")]
    InvalidRange { from: f64, to: f64 },

    /// The condition value is neither a bool, a string, a number nor a range.
    #[error("unsupported condition value")]
    UnsupportedValue,

    /// The action name is not one of the known actions.
    #[error("unknown action `{0}`")]
    UnknownAction(String),
}

/// An identifier that is not a canonical hyphenated UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{value}` is not a valid identifier")]
pub struct MalformedIdentifierError {
    pub value: String,
}

/// A lookup by owner and identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
