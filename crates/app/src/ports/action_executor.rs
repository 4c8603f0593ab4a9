//! Action executor port: carries out the effects of matched rules.

use std::future::Future;
use std::sync::Arc;

use rulekeeper_domain::error::RuleKeeperError;
use rulekeeper_domain::rule::Action;

/// Performs the side effect described by an [`Action`].
///
/// Callers treat execution as fire-and-forget: a returned error is reported
/// but never aborts the evaluation that requested the action.
pub trait ActionExecutor {
    /// Execute a single action.
    fn execute(&self, action: &Action) -> impl Future<Output = Result<(), RuleKeeperError>> + Send;
}

impl<T: ActionExecutor + Send + Sync> ActionExecutor for Arc<T> {
    fn execute(&self, action: &Action) -> impl Future<Output = Result<(), RuleKeeperError>> + Send {
        (**self).execute(action)
    }
}
