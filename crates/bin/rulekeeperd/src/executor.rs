//! Action executor that records dispatched actions as log lines.
//!
//! Email delivery and device actuation live in external services; this
//! executor only reports what they would be asked to do.

use std::future::Future;

use rulekeeper_app::ports::ActionExecutor;
use rulekeeper_domain::error::RuleKeeperError;
use rulekeeper_domain::rule::Action;

/// [`ActionExecutor`] writing one structured `info` event per action.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingActionExecutor;

impl ActionExecutor for TracingActionExecutor {
    fn execute(&self, action: &Action) -> impl Future<Output = Result<(), RuleKeeperError>> + Send {
        match action {
            Action::SendEmail { content, recipient } => {
                tracing::info!(
                    action = action.name(),
                    %recipient,
                    content_len = content.len(),
                    "sending email"
                );
            }
            Action::TurnOff { device_id } => {
                tracing::info!(action = action.name(), %device_id, "turning device off");
            }
        }
        async { Ok(()) }
    }
}
