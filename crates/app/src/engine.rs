//! Rule engine: evaluates an owner's rules against a batch of events.
//!
//! For each event, every rule of the owner is checked in store order. When
//! all conditions of a rule hold, its actions are handed to the
//! [`ActionExecutor`] in stored order. A failing action is logged and the
//! pass continues with the next action.

use rulekeeper_domain::error::RuleKeeperError;
use rulekeeper_domain::event::Event;
use rulekeeper_domain::id::{RuleId, UserId};
use rulekeeper_domain::rule::Rule;

use crate::ports::{ActionExecutor, RuleStore};

/// Stateless evaluate-and-dispatch engine.
pub struct RuleEngine<S, X> {
    store: S,
    executor: X,
}

impl<S, X> RuleEngine<S, X>
where
    S: RuleStore,
    X: ActionExecutor,
{
    /// Create a new engine.
    pub fn new(store: S, executor: X) -> Self {
        Self { store, executor }
    }

    /// Apply the rules of `owner` to `events`.
    ///
    /// Rules are loaded once for the whole batch. The returned list holds
    /// the id of each matched rule, once per matching event, in dispatch
    /// order.
    ///
    /// # Errors
    ///
    /// Returns the store error unchanged when the rules cannot be loaded.
    /// Action failures are never returned.
    #[tracing::instrument(skip(self, events), fields(events = events.len()))]
    pub async fn apply_rules(
        &self,
        owner: UserId,
        events: &[Event],
    ) -> Result<Vec<RuleId>, RuleKeeperError> {
        let rules = self.store.find_all(owner).await?;
        let mut matched = Vec::new();

        for event in events {
            for rule in rules.iter().filter(|rule| rule.is_matched_by(event)) {
                tracing::debug!(
                    rule_id = %rule.id,
                    publisher_id = %event.publisher_id,
                    property = %event.property_name,
                    "rule matched"
                );
                self.dispatch(rule).await;
                matched.push(rule.id);
            }
        }

        Ok(matched)
    }

    async fn dispatch(&self, rule: &Rule) {
        for action in &rule.actions {
            if let Err(err) = self.executor.execute(action).await {
                tracing::warn!(
                    rule_id = %rule.id,
                    action = %action,
                    error = %err,
                    "action execution failed"
                );
            }
        }
    }
}
