//! Shared application state for axum handlers.

use std::sync::Arc;

use rulekeeper_app::engine::RuleEngine;
use rulekeeper_app::ports::{ActionExecutor, RuleStore};
use rulekeeper_app::services::rule_service::RuleService;

/// Application state shared across all axum handlers.
///
/// Generic over the rule store and the action executor to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<S, X> {
    /// Rule ingestion and CRUD service.
    pub rule_service: Arc<RuleService<S>>,
    /// Rule evaluation engine.
    pub engine: Arc<RuleEngine<S, X>>,
}

impl<S, X> Clone for AppState<S, X> {
    fn clone(&self) -> Self {
        Self {
            rule_service: Arc::clone(&self.rule_service),
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<S, X> AppState<S, X>
where
    S: RuleStore + Send + Sync + 'static,
    X: ActionExecutor + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(rule_service: RuleService<S>, engine: RuleEngine<S, X>) -> Self {
        Self {
            rule_service: Arc::new(rule_service),
            engine: Arc::new(engine),
        }
    }
}
