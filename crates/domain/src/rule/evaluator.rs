//! Evaluation of conditions and rules against a single event.

use super::{Condition, Rule};
use crate::event::Event;
use crate::id::DeviceId;

impl Condition {
    /// Whether this condition holds for `event`.
    ///
    /// The event must come from the condition device and carry the
    /// condition property. Publisher and device are compared as identifiers,
    /// so the letter case of the publisher id does not matter. The value compared is the event field matching
    /// the condition kind; an absent field never satisfies the condition.
    #[must_use]
    pub fn is_satisfied(&self, event: &Event) -> bool {
        if !self.observes(event) {
            return false;
        }
        match self {
            Self::Boolean {
                operator, value, ..
            } => event
                .bool_value
                .is_some_and(|actual| operator.compare(value, &actual)),
            Self::String {
                operator, value, ..
            } => event
                .string_value
                .as_deref()
                .is_some_and(|actual| operator.compare(value.as_str(), actual)),
            Self::Numeric {
                operator, value, ..
            } => event
                .numeric_value
                .is_some_and(|actual| operator.compare(value, &actual)),
            Self::Between { from, to, .. } => event
                .numeric_value
                .is_some_and(|actual| self.operator().compare_range(*from, *to, actual)),
        }
    }

    fn observes(&self, event: &Event) -> bool {
        self.property() == event.property_name
            && event
                .publisher_id
                .parse::<DeviceId>()
                .is_ok_and(|publisher| publisher == self.device_id())
    }
}

impl Rule {
    /// Whether every condition of this rule holds for `event`.
    ///
    /// Conditions are checked in stored order and the check stops at the
    /// first one that does not hold.
    #[must_use]
    pub fn is_matched_by(&self, event: &Event) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.is_satisfied(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::UserId;
    use crate::rule::{Action, Operator};

    fn boolean(device_id: DeviceId, property: &str, value: bool) -> Condition {
        Condition::Boolean {
            device_id,
            property: property.to_string(),
            operator: Operator::Eq,
            value,
        }
    }

    fn numeric(device_id: DeviceId, operator: Operator, value: f64) -> Condition {
        Condition::Numeric {
            device_id,
            property: "temperature".to_string(),
            operator,
            value,
        }
    }

    #[test]
    fn should_satisfy_boolean_condition_from_matching_device() {
        let device = DeviceId::new();
        let c = boolean(device, "offline", true);
        assert!(c.is_satisfied(&Event::boolean(device.to_string(), "offline", true)));
        assert!(!c.is_satisfied(&Event::boolean(device.to_string(), "offline", false)));
    }

    #[test]
    fn should_not_satisfy_when_publisher_differs() {
        let c = boolean(DeviceId::new(), "offline", true);
        let other = DeviceId::new();
        assert!(!c.is_satisfied(&Event::boolean(other.to_string(), "offline", true)));
    }

    #[test]
    fn should_not_satisfy_when_publisher_is_not_an_identifier() {
        let c = boolean(DeviceId::new(), "offline", true);
        assert!(!c.is_satisfied(&Event::boolean("sensor-1", "offline", true)));
    }

    #[test]
    fn should_not_satisfy_when_property_differs() {
        let device = DeviceId::new();
        let c = boolean(device, "offline", true);
        assert!(!c.is_satisfied(&Event::boolean(device.to_string(), "online", true)));
    }

    #[test]
    fn should_not_satisfy_when_selected_field_is_absent() {
        let device = DeviceId::new();
        let c = boolean(device, "offline", false);
        assert!(!c.is_satisfied(&Event::numeric(device.to_string(), "offline", 0.0)));
        let n = numeric(device, Operator::Eq, 0.0);
        assert!(!n.is_satisfied(&Event::boolean(device.to_string(), "temperature", false)));
    }

    #[test]
    fn should_compare_string_values_for_equality() {
        let device = DeviceId::new();
        let c = Condition::String {
            device_id: device,
            property: "mode".to_string(),
            operator: Operator::Neq,
            value: "eco".to_string(),
        };
        assert!(c.is_satisfied(&Event::string(device.to_string(), "mode", "boost")));
        assert!(!c.is_satisfied(&Event::string(device.to_string(), "mode", "eco")));
    }

    #[test]
    fn should_compare_condition_value_against_observed_value() {
        let device = DeviceId::new();
        let cases = [
            (Operator::Lt, 13.0, false),
            (Operator::Lt, 20.0, true),
            (Operator::Lt, 15.0, false),
            (Operator::Lte, 10.0, false),
            (Operator::Lte, 15.0, true),
            (Operator::Lte, 20.0, true),
            (Operator::Gt, 20.0, false),
            (Operator::Gt, 15.0, false),
            (Operator::Gt, 10.0, true),
            (Operator::Gte, 20.0, false),
            (Operator::Gte, 15.0, true),
            (Operator::Gte, 13.0, true),
        ];
        for (operator, value, expected) in cases {
            let c = numeric(device, operator, 15.0);
            let event = Event::numeric(device.to_string(), "temperature", value);
            assert_eq!(c.is_satisfied(&event), expected, "15 {operator} {value}");
        }
    }

    #[test]
    fn should_include_bounds_of_range_condition() {
        let device = DeviceId::new();
        let c = Condition::Between {
            device_id: device,
            property: "humidity".to_string(),
            from: 30.0,
            to: 40.0,
        };
        for (value, expected) in [
            (29.9, false),
            (30.0, true),
            (35.0, true),
            (40.0, true),
            (40.1, false),
        ] {
            let event = Event::numeric(device.to_string(), "humidity", value);
            assert_eq!(c.is_satisfied(&event), expected, "value {value}");
        }
    }

    #[test]
    fn should_match_publisher_regardless_of_letter_case() {
        let device = DeviceId::new();
        let c = boolean(device, "offline", true);
        let publisher = device.to_string().to_uppercase();
        assert!(c.is_satisfied(&Event::boolean(publisher, "offline", true)));
    }

    #[test]
    fn should_satisfy_condition_declared_with_uppercase_device() {
        let payload = serde_json::json!({
            "rules": [{
                "userId": "a2dfc0dc-1f14-4935-a78b-92e77c0af7a1",
                "conditions": [{
                    "deviceId": "A32DB207-7236-4E75-ABAD-7C972F4CFD18",
                    "property": "temp",
                    "operator": "=",
                    "value": true,
                }],
                "actions": [{"name": "TURN OFF", "deviceId": "A32DB207-7236-4E75-ABAD-7C972F4CFD18"}],
            }]
        });
        let rules = crate::rule::definition::parse(&payload).unwrap();
        let event = Event::boolean("A32DB207-7236-4E75-ABAD-7C972F4CFD18", "temp", true);
        assert!(rules[0].is_matched_by(&event));
    }

    #[test]
    fn should_match_rule_only_when_every_condition_holds() {
        let device = DeviceId::new();
        let rule = Rule::builder()
            .owner(UserId::new())
            .condition(boolean(device, "offline", true))
            .condition(boolean(device, "offline", true))
            .action(Action::TurnOff { device_id: device })
            .build()
            .unwrap();
        assert!(rule.is_matched_by(&Event::boolean(device.to_string(), "offline", true)));

        let rule = Rule::builder()
            .owner(UserId::new())
            .condition(boolean(device, "offline", true))
            .condition(numeric(device, Operator::Gt, 30.0))
            .action(Action::TurnOff { device_id: device })
            .build()
            .unwrap();
        assert!(!rule.is_matched_by(&Event::boolean(device.to_string(), "offline", true)));
    }

    #[test]
    fn should_not_match_rule_when_either_condition_fails_on_present_field() {
        let device = DeviceId::new();
        let rule = Rule::builder()
            .owner(UserId::new())
            .condition(numeric(device, Operator::Lt, 15.0))
            .condition(numeric(device, Operator::Gte, 25.0))
            .action(Action::TurnOff { device_id: device })
            .build()
            .unwrap();
        let event = |value| Event::numeric(device.to_string(), "temperature", value);

        assert!(rule.is_matched_by(&event(20.0)));
        // first condition false, second true
        assert!(!rule.is_matched_by(&event(10.0)));
        // first condition true, second false
        assert!(!rule.is_matched_by(&event(30.0)));
    }
}
