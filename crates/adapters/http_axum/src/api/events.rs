//! JSON REST handler for event batches.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use rulekeeper_app::ports::{ActionExecutor, RuleStore};
use rulekeeper_domain::event::Event;
use rulekeeper_domain::id::{RuleId, UserId};

use crate::error::{ApiError, parse_id};
use crate::state::AppState;

/// Rules matched by an event batch, once per matching event.
#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub matched: Vec<RuleId>,
}

/// `POST /api/users/{user_id}/events`: evaluate the owner's rules against
/// a batch of events and dispatch the actions of every matched rule.
pub async fn apply<S, X>(
    State(state): State<AppState<S, X>>,
    Path(user_id): Path<String>,
    Json(events): Json<Vec<Event>>,
) -> Result<Json<ApplyResponse>, ApiError>
where
    S: RuleStore + Send + Sync + 'static,
    X: ActionExecutor + Send + Sync + 'static,
{
    let owner: UserId = parse_id(&user_id)?;
    let matched = state.engine.apply_rules(owner, &events).await?;
    Ok(Json(ApplyResponse { matched }))
}
