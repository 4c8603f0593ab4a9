//! Rule: conditions over device telemetry paired with actions.
//!
//! A [`Rule`] belongs to exactly one owner. It matches an event when every
//! one of its [`Condition`]s holds for that event, and a match dispatches
//! every [`Action`] in order. Rules are built from external payloads by
//! the [`definition`] parser and never change once stored: they are
//! replaced or removed as a whole.

mod action;
mod condition;
pub mod definition;
mod evaluator;
mod operator;

pub use action::Action;
pub use condition::{Condition, ConditionKind};
pub use operator::Operator;

use serde::{Deserialize, Serialize};

use crate::error::{MalformedEntityError, RuleKeeperError};
use crate::id::{RuleId, UserId};

/// An owner-scoped pairing of conditions (all must hold) and actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: RuleId,
    #[serde(rename = "userId")]
    pub owner_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
}

impl Rule {
    /// Create a builder for constructing a [`Rule`].
    #[must_use]
    pub fn builder() -> RuleBuilder {
        RuleBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RuleKeeperError::MalformedEntity`] when:
    /// - `conditions` is empty ([`MalformedEntityError::NoConditions`])
    /// - `actions` is empty ([`MalformedEntityError::NoActions`])
    /// - a condition or an action breaks its own invariants
    pub fn validate(&self) -> Result<(), RuleKeeperError> {
        if self.conditions.is_empty() {
            return Err(MalformedEntityError::NoConditions.into());
        }
        if self.actions.is_empty() {
            return Err(MalformedEntityError::NoActions.into());
        }
        for condition in &self.conditions {
            condition.validate()?;
        }
        for action in &self.actions {
            action.validate()?;
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Rule`].
#[derive(Debug, Default)]
pub struct RuleBuilder {
    id: Option<RuleId>,
    owner_id: Option<UserId>,
    name: Option<String>,
    conditions: Vec<Condition>,
    actions: Vec<Action>,
}

impl RuleBuilder {
    #[must_use]
    pub fn id(mut self, id: RuleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn owner(mut self, owner_id: UserId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Consume the builder, validate, and return a [`Rule`].
    ///
    /// A fresh [`RuleId`] is generated when none was given.
    ///
    /// # Errors
    ///
    /// Returns [`RuleKeeperError::MalformedEntity`] if the owner is missing
    /// or the rule breaks its invariants.
    pub fn build(self) -> Result<Rule, RuleKeeperError> {
        let owner_id = self
            .owner_id
            .ok_or(MalformedEntityError::MissingField("userId"))?;
        let rule = Rule {
            id: self.id.unwrap_or_default(),
            owner_id,
            name: self.name.filter(|name| !name.is_empty()),
            conditions: self.conditions,
            actions: self.actions,
        };
        rule.validate()?;
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::DeviceId;

    fn offline_condition() -> Condition {
        Condition::Boolean {
            device_id: DeviceId::new(),
            property: "offline".to_string(),
            operator: Operator::Eq,
            value: true,
        }
    }

    fn turn_off() -> Action {
        Action::TurnOff {
            device_id: DeviceId::new(),
        }
    }

    #[test]
    fn should_build_valid_rule_when_required_fields_provided() {
        let owner = UserId::new();
        let rule = Rule::builder()
            .owner(owner)
            .name("rule01")
            .condition(offline_condition())
            .action(turn_off())
            .build()
            .unwrap();
        assert_eq!(rule.owner_id, owner);
        assert_eq!(rule.name.as_deref(), Some("rule01"));
        assert_eq!(rule.conditions.len(), 1);
        assert_eq!(rule.actions.len(), 1);
    }

    #[test]
    fn should_generate_id_when_not_specified() {
        let build = || {
            Rule::builder()
                .owner(UserId::new())
                .condition(offline_condition())
                .action(turn_off())
                .build()
                .unwrap()
        };
        assert_ne!(build().id, build().id);
    }

    #[test]
    fn should_keep_custom_id() {
        let id = RuleId::new();
        let rule = Rule::builder()
            .id(id)
            .owner(UserId::new())
            .condition(offline_condition())
            .action(turn_off())
            .build()
            .unwrap();
        assert_eq!(rule.id, id);
    }

    #[test]
    fn should_drop_empty_name() {
        let rule = Rule::builder()
            .owner(UserId::new())
            .name("")
            .condition(offline_condition())
            .action(turn_off())
            .build()
            .unwrap();
        assert!(rule.name.is_none());
    }

    #[test]
    fn should_return_malformed_entity_when_owner_is_missing() {
        let result = Rule::builder()
            .condition(offline_condition())
            .action(turn_off())
            .build();
        assert!(matches!(
            result,
            Err(RuleKeeperError::MalformedEntity(
                MalformedEntityError::MissingField("userId")
            ))
        ));
    }

    #[test]
    fn should_return_malformed_entity_when_conditions_are_empty() {
        let result = Rule::builder().owner(UserId::new()).action(turn_off()).build();
        assert!(matches!(
            result,
            Err(RuleKeeperError::MalformedEntity(
                MalformedEntityError::NoConditions
            ))
        ));
    }

    #[test]
    fn should_return_malformed_entity_when_actions_are_empty() {
        let result = Rule::builder()
            .owner(UserId::new())
            .condition(offline_condition())
            .build();
        assert!(matches!(
            result,
            Err(RuleKeeperError::MalformedEntity(MalformedEntityError::NoActions))
        ));
    }

    #[test]
    fn should_propagate_condition_invariant_failure() {
        let result = Rule::builder()
            .owner(UserId::new())
            .condition(Condition::Boolean {
                device_id: DeviceId::new(),
                property: "offline".to_string(),
                operator: Operator::Lt,
                value: true,
            })
            .action(turn_off())
            .build();
        assert!(matches!(
            result,
            Err(RuleKeeperError::MalformedEntity(
                MalformedEntityError::IncompatibleOperator { .. }
            ))
        ));
    }

    #[test]
    fn should_roundtrip_rule_through_serde_json() {
        let rule = Rule::builder()
            .owner(UserId::new())
            .name("rule01")
            .condition(offline_condition())
            .condition(Condition::Between {
                device_id: DeviceId::new(),
                property: "org".to_string(),
                from: 30.0,
                to: 40.0,
            })
            .action(turn_off())
            .action(Action::SendEmail {
                content: "Alert".to_string(),
                recipient: "person01@home.com".to_string(),
            })
            .build()
            .unwrap();
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["userId"], serde_json::json!(rule.owner_id));
        let parsed: Rule = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, rule);
    }
}
