//! Action: the effect requested when a rule matches.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MalformedEntityError;
use crate::id::DeviceId;

/// An effect dispatched to the action executor when every condition of
/// the owning rule holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum Action {
    /// Send an email notification.
    #[serde(rename = "SEND EMAIL")]
    SendEmail {
        /// Body of the message, usually HTML.
        content: String,
        recipient: String,
    },
    /// Switch a device off.
    #[serde(rename = "TURN OFF")]
    TurnOff {
        #[serde(rename = "deviceId")]
        device_id: DeviceId,
    },
}

impl Action {
    /// Wire name of [`Action::SendEmail`].
    pub const SEND_EMAIL: &'static str = "SEND EMAIL";
    /// Wire name of [`Action::TurnOff`].
    pub const TURN_OFF: &'static str = "TURN OFF";

    /// Wire name of this action.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SendEmail { .. } => Self::SEND_EMAIL,
            Self::TurnOff { .. } => Self::TURN_OFF,
        }
    }

    /// Check the action invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedEntityError::EmptyField`] when an email action has
    /// an empty content or recipient.
    pub fn validate(&self) -> Result<(), MalformedEntityError> {
        if let Self::SendEmail { content, recipient } = self {
            if content.is_empty() {
                return Err(MalformedEntityError::EmptyField("content"));
            }
            if recipient.is_empty() {
                return Err(MalformedEntityError::EmptyField("recipient"));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SendEmail { recipient, .. } => write!(f, "send_email({recipient})"),
            Self::TurnOff { device_id } => write!(f, "turn_off({device_id})"),
        }
    }
}
