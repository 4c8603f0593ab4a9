//! Rule store port: persistence for rules, scoped by owner.

use std::future::Future;
use std::sync::Arc;

use rulekeeper_domain::error::RuleKeeperError;
use rulekeeper_domain::id::{RuleId, UserId};
use rulekeeper_domain::rule::Rule;

/// Repository for persisting and querying [`Rule`]s.
///
/// Rules are keyed by `(owner, id)`. Failures of the underlying storage are
/// reported as [`RuleKeeperError::Storage`].
pub trait RuleStore {
    /// Store a rule, replacing any rule with the same owner and id.
    fn save(&self, rule: Rule) -> impl Future<Output = Result<(), RuleKeeperError>> + Send;

    /// Get one rule of an owner.
    fn find_one(
        &self,
        owner: UserId,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, RuleKeeperError>> + Send;

    /// Get every rule of an owner, in insertion order.
    ///
    /// An owner without rules gets an empty list, never an error.
    fn find_all(
        &self,
        owner: UserId,
    ) -> impl Future<Output = Result<Vec<Rule>, RuleKeeperError>> + Send;

    /// Remove a rule. Removing a rule that does not exist succeeds.
    fn remove(
        &self,
        owner: UserId,
        id: RuleId,
    ) -> impl Future<Output = Result<(), RuleKeeperError>> + Send;
}

impl<T: RuleStore + Send + Sync> RuleStore for Arc<T> {
    fn save(&self, rule: Rule) -> impl Future<Output = Result<(), RuleKeeperError>> + Send {
        (**self).save(rule)
    }

    fn find_one(
        &self,
        owner: UserId,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, RuleKeeperError>> + Send {
        (**self).find_one(owner, id)
    }

    fn find_all(
        &self,
        owner: UserId,
    ) -> impl Future<Output = Result<Vec<Rule>, RuleKeeperError>> + Send {
        (**self).find_all(owner)
    }

    fn remove(
        &self,
        owner: UserId,
        id: RuleId,
    ) -> impl Future<Output = Result<(), RuleKeeperError>> + Send {
        (**self).remove(owner, id)
    }
}
