//! In-memory rule store.
//!
//! Keeps rules in insertion order behind a tokio [`RwLock`]. Clones share
//! the same state, so a store handed to a service and to an engine sees
//! the same rules. Nothing is shared between separately constructed stores.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

use rulekeeper_domain::error::RuleKeeperError;
use rulekeeper_domain::id::{RuleId, UserId};
use rulekeeper_domain::rule::Rule;

use crate::ports::RuleStore;

/// [`RuleStore`] holding rules in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRuleStore {
    rules: Arc<RwLock<Vec<Rule>>>,
}

impl InMemoryRuleStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `rules`, in the given order.
    #[must_use]
    pub fn with_rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: Arc::new(RwLock::new(rules.into_iter().collect())),
        }
    }
}

impl RuleStore for InMemoryRuleStore {
    fn save(&self, rule: Rule) -> impl Future<Output = Result<(), RuleKeeperError>> + Send {
        let rules = Arc::clone(&self.rules);
        async move {
            let mut rules = rules.write().await;
            match rules
                .iter_mut()
                .find(|stored| stored.owner_id == rule.owner_id && stored.id == rule.id)
            {
                Some(stored) => *stored = rule,
                None => rules.push(rule),
            }
            Ok(())
        }
    }

    fn find_one(
        &self,
        owner: UserId,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, RuleKeeperError>> + Send {
        let rules = Arc::clone(&self.rules);
        async move {
            let rules = rules.read().await;
            Ok(rules
                .iter()
                .find(|rule| rule.owner_id == owner && rule.id == id)
                .cloned())
        }
    }

    fn find_all(
        &self,
        owner: UserId,
    ) -> impl Future<Output = Result<Vec<Rule>, RuleKeeperError>> + Send {
        let rules = Arc::clone(&self.rules);
        async move {
            let rules = rules.read().await;
            Ok(rules
                .iter()
                .filter(|rule| rule.owner_id == owner)
                .cloned()
                .collect())
        }
    }

    fn remove(
        &self,
        owner: UserId,
        id: RuleId,
    ) -> impl Future<Output = Result<(), RuleKeeperError>> + Send {
        let rules = Arc::clone(&self.rules);
        async move {
            rules
                .write()
                .await
                .retain(|rule| !(rule.owner_id == owner && rule.id == id));
            Ok(())
        }
    }
}
