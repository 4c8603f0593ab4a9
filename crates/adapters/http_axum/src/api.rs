//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod events;
#[allow(clippy::missing_errors_doc)]
pub mod rules;

use axum::Router;
use axum::routing::{get, post};

use rulekeeper_app::ports::{ActionExecutor, RuleStore};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, X>() -> Router<AppState<S, X>>
where
    S: RuleStore + Send + Sync + 'static,
    X: ActionExecutor + Send + Sync + 'static,
{
    Router::new()
        // Rule definitions
        .route("/rules", post(rules::ingest::<S, X>))
        // Rules of an owner
        .route("/users/{user_id}/rules", get(rules::list::<S, X>))
        .route(
            "/users/{user_id}/rules/{rule_id}",
            get(rules::get::<S, X>).delete(rules::delete::<S, X>),
        )
        // Telemetry
        .route("/users/{user_id}/events", post(events::apply::<S, X>))
}
