//! Event: one observation of a device property, delivered by the telemetry
//! stream.
//!
//! Events are read-only input to the evaluator and are never persisted.
//! Only the value field matching the observation type is populated; the
//! others stay `None`.

use serde::{Deserialize, Serialize};

/// A single device-property observation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Identifier of the publishing device, as sent by the producer.
    pub publisher_id: String,
    /// Name of the observed property.
    pub property_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bool_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_value: Option<f64>,
}

impl Event {
    /// Build an event carrying a boolean value.
    #[must_use]
    pub fn boolean(
        publisher_id: impl Into<String>,
        property_name: impl Into<String>,
        value: bool,
    ) -> Self {
        Self {
            publisher_id: publisher_id.into(),
            property_name: property_name.into(),
            bool_value: Some(value),
            ..Self::default()
        }
    }

    /// Build an event carrying a string value.
    #[must_use]
    pub fn string(
        publisher_id: impl Into<String>,
        property_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            publisher_id: publisher_id.into(),
            property_name: property_name.into(),
            string_value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Build an event carrying a numeric value.
    #[must_use]
    pub fn numeric(
        publisher_id: impl Into<String>,
        property_name: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            publisher_id: publisher_id.into(),
            property_name: property_name.into(),
            numeric_value: Some(value),
            ..Self::default()
        }
    }
}
