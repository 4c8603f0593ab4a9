//! Axum router assembly.

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use rulekeeper_app::ports::{ActionExecutor, RuleStore};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and exposes `/health`, which reports the
/// service name and version.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<S, X>(state: AppState<S, X>) -> Router
where
    S: RuleStore + Send + Sync + 'static,
    X: ActionExecutor + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct Health {
    name: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<Health> {
    Json(Health {
        name: "rulekeeper",
        version: env!("CARGO_PKG_VERSION"),
    })
}
