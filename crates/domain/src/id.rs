//! Typed identifier newtypes backed by UUIDs.
//!
//! Textual identifiers are accepted only in the canonical hyphenated form
//! (`xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MalformedIdentifierError;

const HYPHENATED_LEN: usize = 36;

/// Parse a canonical hyphenated UUID, rejecting the simple, braced and URN forms.
/// Hex digits are accepted in either case.
fn parse_uuid(value: &str) -> Result<uuid::Uuid, MalformedIdentifierError> {
    if value.len() != HYPHENATED_LEN {
        return Err(MalformedIdentifierError {
            value: value.to_string(),
        });
    }
    uuid::Uuid::parse_str(value).map_err(|_| MalformedIdentifierError {
        value: value.to_string(),
    })
}

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = MalformedIdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_uuid(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Rule`](crate::rule::Rule).
    RuleId
);

define_id!(
    /// Identifier of the user owning a set of rules.
    UserId
);

define_id!(
    /// Identifier of a device publishing telemetry or receiving commands.
    DeviceId
);
