//! Rule definition parser.
//!
//! Turns an untyped payload of the form
//!
//! ```json
//! { "rules": [ { "userId": "…", "name": "…", "conditions": [ … ], "actions": [ … ] } ] }
//! ```
//!
//! into validated [`Rule`]s. Parsing is all-or-nothing: the first invalid
//! rule rejects the whole payload and no rule is returned.
//!
//! Each condition value is classified exactly once into a raw shape
//! (bool, text, number or range object). The classification decides the
//! [`Condition`] variant and the operators it accepts.

use serde_json::{Map, Value};

use super::{Action, Condition, ConditionKind, Operator, Rule};
use crate::error::{MalformedEntityError, RuleKeeperError};
use crate::id::{DeviceId, UserId};

type Object = Map<String, Value>;

/// Parse a raw JSON payload into rules.
///
/// # Errors
///
/// Returns [`RuleKeeperError::MalformedEntity`] when the bytes are not
/// JSON ([`MalformedEntityError::Decode`]) or when any rule is invalid.
pub fn parse_slice(payload: &[u8]) -> Result<Vec<Rule>, RuleKeeperError> {
    let value: Value = serde_json::from_slice(payload)
        .map_err(|err| MalformedEntityError::Decode(err.to_string()))?;
    parse(&value)
}

/// Parse a decoded JSON payload into rules.
///
/// A missing, `null` or empty `rules` list yields no rule.
///
/// # Errors
///
/// Returns [`RuleKeeperError::MalformedEntity`] for the first invalid rule.
pub fn parse(payload: &Value) -> Result<Vec<Rule>, RuleKeeperError> {
    let root = as_object(payload, "payload")?;
    let rules = match root.get("rules") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(MalformedEntityError::Decode("`rules` must be a list".to_string()).into());
        }
    };
    rules.iter().map(parse_rule).collect()
}

fn parse_rule(value: &Value) -> Result<Rule, RuleKeeperError> {
    let object = as_object(value, "rule")?;
    let owner: UserId = identifier_field(object, "userId")?;
    let name = optional_string_field(object, "name")?;
    let conditions = list_field(object, "conditions", MalformedEntityError::NoConditions)?;
    let actions = list_field(object, "actions", MalformedEntityError::NoActions)?;

    let mut builder = Rule::builder().owner(owner);
    if let Some(name) = name {
        builder = builder.name(name);
    }
    for condition in conditions {
        builder = builder.condition(parse_condition(condition)?);
    }
    for action in actions {
        builder = builder.action(parse_action(action)?);
    }
    builder.build()
}

/// Shape of a condition value, decided once from the JSON type.
#[derive(Debug, Clone, PartialEq)]
enum RawValue {
    Bool(bool),
    Text(String),
    Number(f64),
    Range { from: f64, to: f64 },
}

impl RawValue {
    fn classify(value: Option<&Value>) -> Result<Self, MalformedEntityError> {
        match value {
            Some(Value::Bool(value)) => Ok(Self::Bool(*value)),
            Some(Value::String(value)) => Ok(Self::Text(value.clone())),
            Some(Value::Number(value)) => value
                .as_f64()
                .map(Self::Number)
                .ok_or(MalformedEntityError::UnsupportedValue),
            Some(Value::Object(range)) => Ok(Self::Range {
                from: range_bound(range, "from")?,
                to: range_bound(range, "to")?,
            }),
            None | Some(Value::Null | Value::Array(_)) => Err(MalformedEntityError::UnsupportedValue),
        }
    }

    fn kind(&self) -> ConditionKind {
        match self {
            Self::Bool(_) => ConditionKind::Boolean,
            Self::Text(_) => ConditionKind::String,
            Self::Number(_) => ConditionKind::Numeric,
            Self::Range { .. } => ConditionKind::Between,
        }
    }
}

fn range_bound(range: &Object, name: &str) -> Result<f64, MalformedEntityError> {
    range
        .get(name)
        .and_then(Value::as_f64)
        .ok_or(MalformedEntityError::UnsupportedValue)
}

fn parse_condition(value: &Value) -> Result<Condition, MalformedEntityError> {
    let object = as_object(value, "condition")?;
    let device_id: DeviceId = identifier_field(object, "deviceId")?;
    let property = string_field(object, "property")?;
    if property.is_empty() {
        return Err(MalformedEntityError::EmptyField("property"));
    }
    let operator = operator_field(object)?;
    let raw = RawValue::classify(object.get("value"))?;
    let kind = raw.kind();
    if !operator.accepts(kind) {
        return Err(MalformedEntityError::IncompatibleOperator {
            operator,
            kind: kind.name(),
        });
    }

    let property = property.to_string();
    let condition = match raw {
        RawValue::Bool(value) => Condition::Boolean {
            device_id,
            property,
            operator,
            value,
        },
        RawValue::Text(value) => Condition::String {
            device_id,
            property,
            operator,
            value,
        },
        RawValue::Number(value) => Condition::Numeric {
            device_id,
            property,
            operator,
            value,
        },
        RawValue::Range { from, to } => Condition::Between {
            device_id,
            property,
            from,
            to,
        },
    };
    condition.validate()?;
    Ok(condition)
}

fn operator_field(object: &Object) -> Result<Operator, MalformedEntityError> {
    match object.get("operator") {
        None | Some(Value::Null) => Err(MalformedEntityError::UndefinedOperator),
        Some(Value::String(text)) => text.parse(),
        Some(other) => Err(MalformedEntityError::UnknownOperator(other.to_string())),
    }
}

fn parse_action(value: &Value) -> Result<Action, MalformedEntityError> {
    let object = as_object(value, "action")?;
    let action = match string_field(object, "name")? {
        Action::SEND_EMAIL => Action::SendEmail {
            content: string_field(object, "content")?.to_string(),
            recipient: string_field(object, "recipient")?.to_string(),
        },
        Action::TURN_OFF => Action::TurnOff {
            device_id: identifier_field(object, "deviceId")?,
        },
        other => return Err(MalformedEntityError::UnknownAction(other.to_string())),
    };
    action.validate()?;
    Ok(action)
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Object, MalformedEntityError> {
    value
        .as_object()
        .ok_or_else(|| MalformedEntityError::Decode(format!("{what} must be an object")))
}

fn field<'a>(object: &'a Object, name: &'static str) -> Result<&'a Value, MalformedEntityError> {
    match object.get(name) {
        None | Some(Value::Null) => Err(MalformedEntityError::MissingField(name)),
        Some(value) => Ok(value),
    }
}

fn string_field<'a>(object: &'a Object, name: &'static str) -> Result<&'a str, MalformedEntityError> {
    field(object, name)?
        .as_str()
        .ok_or_else(|| MalformedEntityError::Decode(format!("`{name}` must be a string")))
}

fn optional_string_field<'a>(
    object: &'a Object,
    name: &'static str,
) -> Result<Option<&'a str>, MalformedEntityError> {
    match object.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(_) => Err(MalformedEntityError::Decode(format!(
            "`{name}` must be a string"
        ))),
    }
}

fn identifier_field<T: std::str::FromStr>(
    object: &Object,
    name: &'static str,
) -> Result<T, MalformedEntityError> {
    string_field(object, name)?
        .parse()
        .map_err(|_| MalformedEntityError::InvalidIdentifier(name))
}

fn list_field<'a>(
    object: &'a Object,
    name: &'static str,
    empty: MalformedEntityError,
) -> Result<&'a [Value], MalformedEntityError> {
    match object.get(name) {
        None | Some(Value::Null) => Err(empty),
        Some(Value::Array(items)) if items.is_empty() => Err(empty),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(MalformedEntityError::Decode(format!(
            "`{name}` must be a list"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::event::Event;

    const USER: &str = "a2dfc0dc-1f14-4935-a78b-92e77c0af7a1";
    const DEVICE: &str = "a32db207-7236-4e75-abad-7c972f4cfd18";

    fn condition(operator: &str, value: Value) -> Value {
        json!({
            "deviceId": DEVICE,
            "property": "temperature",
            "operator": operator,
            "value": value,
        })
    }

    fn turn_off() -> Value {
        json!({"name": "TURN OFF", "deviceId": DEVICE})
    }

    fn payload(conditions: Value, actions: Value) -> Value {
        json!({
            "rules": [{
                "userId": USER,
                "name": "rule01",
                "conditions": conditions,
                "actions": actions,
            }]
        })
    }

    fn reason(result: Result<Vec<Rule>, RuleKeeperError>) -> MalformedEntityError {
        match result {
            Err(RuleKeeperError::MalformedEntity(reason)) => reason,
            other => panic!("expected malformed entity, got {other:?}"),
        }
    }

    #[test]
    fn should_parse_offline_rule_and_match_event_from_condition_device() {
        let rules = parse(&json!({
            "rules": [{
                "userId": USER,
                "name": "rule01",
                "conditions": [{
                    "deviceId": DEVICE,
                    "property": "offline",
                    "operator": "=",
                    "value": true,
                }],
                "actions": [{"name": "TURN OFF", "deviceId": DEVICE}],
            }]
        }))
        .unwrap();

        assert_eq!(rules.len(), 1);
        let rule = &rules[0];
        assert_eq!(rule.owner_id.to_string(), USER);
        assert_eq!(rule.name.as_deref(), Some("rule01"));
        assert!(matches!(
            &rule.conditions[..],
            [Condition::Boolean { operator: Operator::Eq, value: true, .. }]
        ));
        assert!(matches!(&rule.actions[..], [Action::TurnOff { device_id }] if device_id.to_string() == DEVICE));

        let event = Event::boolean(DEVICE, "offline", true);
        assert!(rule.conditions[0].is_satisfied(&event));
        assert!(rule.is_matched_by(&event));
    }

    #[test]
    fn should_classify_condition_by_value_shape() {
        let rules = parse(&payload(
            json!([
                condition("=", json!(true)),
                condition("!=", json!("eco")),
                condition(">=", json!(30)),
                condition("BETWEEN", json!({"from": 30, "to": 40.5})),
            ]),
            json!([turn_off()]),
        ))
        .unwrap();
        let kinds: Vec<_> = rules[0].conditions.iter().map(Condition::kind).collect();
        assert_eq!(
            kinds,
            [
                ConditionKind::Boolean,
                ConditionKind::String,
                ConditionKind::Numeric,
                ConditionKind::Between,
            ]
        );
        assert!(matches!(
            rules[0].conditions[3],
            Condition::Between { from, to, .. } if from == 30.0 && to == 40.5
        ));
    }

    #[test]
    fn should_parse_send_email_action() {
        let rules = parse(&payload(
            json!([condition(">", json!(30))]),
            json!([{
                "name": "SEND EMAIL",
                "content": "<b>High temperature</b>",
                "recipient": "person01@home.com",
                "priority": "ignored",
            }]),
        ))
        .unwrap();
        assert_eq!(
            rules[0].actions,
            [Action::SendEmail {
                content: "<b>High temperature</b>".to_string(),
                recipient: "person01@home.com".to_string(),
            }]
        );
    }

    #[test]
    fn should_assign_fresh_id_to_every_rule() {
        let rule = json!({
            "userId": USER,
            "conditions": [condition("<", json!(10))],
            "actions": [turn_off()],
        });
        let rules = parse(&json!({"rules": [rule.clone(), rule]})).unwrap();
        assert_eq!(rules.len(), 2);
        assert_ne!(rules[0].id, rules[1].id);
        assert!(rules[0].name.is_none());
    }

    #[test]
    fn should_drop_empty_name() {
        let mut value = payload(json!([condition("<", json!(10))]), json!([turn_off()]));
        value["rules"][0]["name"] = json!("");
        let rules = parse(&value).unwrap();
        assert!(rules[0].name.is_none());
    }

    #[test]
    fn should_return_no_rule_when_list_is_missing_or_empty() {
        assert!(parse(&json!({})).unwrap().is_empty());
        assert!(parse(&json!({"rules": []})).unwrap().is_empty());
        assert!(parse_slice(br#"{"rules": null}"#).unwrap().is_empty());
    }

    #[test]
    fn should_reject_invalid_json_bytes() {
        assert!(matches!(
            reason(parse_slice(b"{\"rules\": [")),
            MalformedEntityError::Decode(_)
        ));
        assert!(matches!(
            reason(parse(&json!([1, 2]))),
            MalformedEntityError::Decode(_)
        ));
    }

    #[test]
    fn should_reject_missing_or_malformed_owner() {
        let mut value = payload(json!([condition("<", json!(10))]), json!([turn_off()]));
        value["rules"][0]
            .as_object_mut()
            .unwrap()
            .remove("userId");
        assert_eq!(reason(parse(&value)), MalformedEntityError::MissingField("userId"));

        value["rules"][0]["userId"] = json!("user-1");
        assert_eq!(
            reason(parse(&value)),
            MalformedEntityError::InvalidIdentifier("userId")
        );
    }

    #[test]
    fn should_reject_zero_conditions_or_zero_actions() {
        assert_eq!(
            reason(parse(&payload(json!([]), json!([turn_off()])))),
            MalformedEntityError::NoConditions
        );
        assert_eq!(
            reason(parse(&payload(
                json!([condition("<", json!(10))]),
                json!([])
            ))),
            MalformedEntityError::NoActions
        );
        // empty lists win over invalid items
        assert_eq!(
            reason(parse(&payload(json!([{"deviceId": "nope"}]), json!([])))),
            MalformedEntityError::NoActions
        );
    }

    #[test]
    fn should_reject_unknown_or_missing_operator() {
        assert_eq!(
            reason(parse(&payload(
                json!([condition("=>", json!(10))]),
                json!([turn_off()])
            ))),
            MalformedEntityError::UnknownOperator("=>".to_string())
        );

        let mut missing = condition("<", json!(10));
        missing.as_object_mut().unwrap().remove("operator");
        assert_eq!(
            reason(parse(&payload(json!([missing]), json!([turn_off()])))),
            MalformedEntityError::UndefinedOperator
        );
    }

    #[test]
    fn should_reject_incompatible_operator_and_value() {
        for (operator, value) in [
            ("BETWEEN", json!(10)),
            ("<", json!(true)),
            (">=", json!("eco")),
            ("=", json!({"from": 1, "to": 2})),
        ] {
            assert!(
                matches!(
                    reason(parse(&payload(
                        json!([condition(operator, value.clone())]),
                        json!([turn_off()])
                    ))),
                    MalformedEntityError::IncompatibleOperator { .. }
                ),
                "{operator} {value}"
            );
        }
    }

    #[test]
    fn should_reject_range_with_from_not_below_to() {
        for range in [json!({"from": 40, "to": 40}), json!({"from": 41, "to": 40})] {
            assert!(matches!(
                reason(parse(&payload(
                    json!([condition("BETWEEN", range)]),
                    json!([turn_off()])
                ))),
                MalformedEntityError::InvalidRange { .. }
            ));
        }
    }

    #[test]
    fn should_reject_range_with_non_numeric_bound_and_keep_no_rule() {
        let raw = format!(
            r#"{{"rules": [
                {{"userId": "{USER}", "conditions": [{{"deviceId": "{DEVICE}", "property": "humidity", "operator": "<", "value": 3}}], "actions": [{{"name": "TURN OFF", "deviceId": "{DEVICE}"}}]}},
                {{"userId": "{USER}", "conditions": [{{"deviceId": "{DEVICE}", "property": "humidity", "operator": "BETWEEN", "value": {{"from": 30, "to": "wrong"}}}}], "actions": [{{"name": "TURN OFF", "deviceId": "{DEVICE}"}}]}}
            ]}}"#
        );
        let result = parse_slice(raw.as_bytes());
        assert_eq!(reason(result), MalformedEntityError::UnsupportedValue);
    }

    #[test]
    fn should_ignore_extra_keys_in_range_object() {
        let rules = parse(&payload(
            json!([condition("BETWEEN", json!({"from": 1, "to": 2, "unit": "C"}))]),
            json!([turn_off()]),
        ))
        .unwrap();
        assert_eq!(rules[0].conditions[0].kind(), ConditionKind::Between);
    }

    #[test]
    fn should_reject_unsupported_condition_values() {
        for value in [json!(null), json!([1, 2])] {
            assert_eq!(
                reason(parse(&payload(
                    json!([condition("=", value)]),
                    json!([turn_off()])
                ))),
                MalformedEntityError::UnsupportedValue
            );
        }
    }

    #[test]
    fn should_reject_invalid_condition_fields() {
        let mut bad_device = condition("<", json!(10));
        bad_device["deviceId"] = json!("device-1");
        assert_eq!(
            reason(parse(&payload(json!([bad_device]), json!([turn_off()])))),
            MalformedEntityError::InvalidIdentifier("deviceId")
        );

        let mut empty_property = condition("<", json!(10));
        empty_property["property"] = json!("");
        assert_eq!(
            reason(parse(&payload(json!([empty_property]), json!([turn_off()])))),
            MalformedEntityError::EmptyField("property")
        );
    }

    #[test]
    fn should_reject_invalid_actions() {
        let conditions = json!([condition("<", json!(10))]);
        assert_eq!(
            reason(parse(&payload(
                conditions.clone(),
                json!([{"name": "REBOOT"}])
            ))),
            MalformedEntityError::UnknownAction("REBOOT".to_string())
        );
        assert_eq!(
            reason(parse(&payload(
                conditions.clone(),
                json!([{"name": "SEND EMAIL", "content": "hi", "recipient": ""}])
            ))),
            MalformedEntityError::EmptyField("recipient")
        );
        assert_eq!(
            reason(parse(&payload(
                conditions.clone(),
                json!([{"name": "SEND EMAIL", "recipient": "person01@home.com"}])
            ))),
            MalformedEntityError::MissingField("content")
        );
        assert_eq!(
            reason(parse(&payload(
                conditions,
                json!([{"name": "TURN OFF", "deviceId": 42}])
            ))),
            MalformedEntityError::Decode("`deviceId` must be a string".to_string())
        );
    }
}
