//! Rule service: use-cases for ingesting and managing rules.

use rulekeeper_domain::error::{NotFoundError, RuleKeeperError};
use rulekeeper_domain::id::{RuleId, UserId};
use rulekeeper_domain::rule::{Rule, definition};

use crate::ports::RuleStore;

/// Application service for rule ingestion and CRUD operations.
pub struct RuleService<S> {
    store: S,
}

impl<S: RuleStore> RuleService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Parse a rule definition payload and save every rule it holds.
    ///
    /// Parsing is all-or-nothing: nothing is saved when the payload is
    /// invalid. Rules are saved in payload order.
    ///
    /// # Errors
    ///
    /// Returns [`RuleKeeperError::MalformedEntity`] if the payload is
    /// invalid, or a storage error propagated from the store.
    #[tracing::instrument(skip(self, payload), fields(payload_len = payload.len()))]
    pub async fn ingest(&self, payload: &[u8]) -> Result<Vec<Rule>, RuleKeeperError> {
        let rules = definition::parse_slice(payload).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected rule definition payload");
        })?;
        for rule in &rules {
            self.store.save(rule.clone()).await?;
            tracing::info!(
                rule_id = %rule.id,
                owner_id = %rule.owner_id,
                conditions = rule.conditions.len(),
                actions = rule.actions.len(),
                "rule saved"
            );
        }
        Ok(rules)
    }

    /// Save a rule after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RuleKeeperError::MalformedEntity`] if invariants fail, or a
    /// storage error propagated from the store.
    #[tracing::instrument(skip(self, rule), fields(rule_id = %rule.id, owner_id = %rule.owner_id))]
    pub async fn save_rule(&self, rule: Rule) -> Result<Rule, RuleKeeperError> {
        rule.validate()?;
        self.store.save(rule.clone()).await?;
        Ok(rule)
    }

    /// Look up a rule of an owner, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`RuleKeeperError::NotFound`] when the owner has no rule with
    /// `id`, or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn view_rule(&self, owner: UserId, id: RuleId) -> Result<Rule, RuleKeeperError> {
        self.store.find_one(owner, id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Rule",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all rules of an owner.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_rules(&self, owner: UserId) -> Result<Vec<Rule>, RuleKeeperError> {
        self.store.find_all(owner).await
    }

    /// Remove a rule of an owner. Removing a missing rule succeeds.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip(self))]
    pub async fn remove_rule(&self, owner: UserId, id: RuleId) -> Result<(), RuleKeeperError> {
        self.store.remove(owner, id).await
    }
}
