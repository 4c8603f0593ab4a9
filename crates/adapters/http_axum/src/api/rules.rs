//! JSON REST handlers for rules.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use rulekeeper_app::ports::{ActionExecutor, RuleStore};
use rulekeeper_domain::id::{RuleId, UserId};
use rulekeeper_domain::rule::Rule;

use crate::error::{ApiError, parse_id};
use crate::state::AppState;

/// Possible responses from the ingest endpoint.
pub enum IngestResponse {
    Created(Json<Vec<Rule>>),
}

impl IntoResponse for IngestResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Vec<Rule>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(rules) => {
                ([("x-count", rules.len().to_string())], Json(rules)).into_response()
            }
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Rule>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `POST /api/rules`: ingest a rule definition payload.
///
/// The body is parsed as a whole: one invalid rule rejects the payload and
/// nothing is saved.
pub async fn ingest<S, X>(
    State(state): State<AppState<S, X>>,
    body: Bytes,
) -> Result<IngestResponse, ApiError>
where
    S: RuleStore + Send + Sync + 'static,
    X: ActionExecutor + Send + Sync + 'static,
{
    let rules = state.rule_service.ingest(&body).await?;
    Ok(IngestResponse::Created(Json(rules)))
}

/// `GET /api/users/{user_id}/rules`: list the rules of an owner.
pub async fn list<S, X>(
    State(state): State<AppState<S, X>>,
    Path(user_id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    S: RuleStore + Send + Sync + 'static,
    X: ActionExecutor + Send + Sync + 'static,
{
    let owner: UserId = parse_id(&user_id)?;
    let rules = state.rule_service.list_rules(owner).await?;
    Ok(ListResponse::Ok(rules))
}

/// `GET /api/users/{user_id}/rules/{rule_id}`: get one rule of an owner.
pub async fn get<S, X>(
    State(state): State<AppState<S, X>>,
    Path((user_id, rule_id)): Path<(String, String)>,
) -> Result<GetResponse, ApiError>
where
    S: RuleStore + Send + Sync + 'static,
    X: ActionExecutor + Send + Sync + 'static,
{
    let owner: UserId = parse_id(&user_id)?;
    let rule_id: RuleId = parse_id(&rule_id)?;
    let rule = state.rule_service.view_rule(owner, rule_id).await?;
    Ok(GetResponse::Ok(Json(rule)))
}

/// `DELETE /api/users/{user_id}/rules/{rule_id}`: remove a rule.
///
/// Removing a rule that does not exist also answers `204`.
pub async fn delete<S, X>(
    State(state): State<AppState<S, X>>,
    Path((user_id, rule_id)): Path<(String, String)>,
) -> Result<DeleteResponse, ApiError>
where
    S: RuleStore + Send + Sync + 'static,
    X: ActionExecutor + Send + Sync + 'static,
{
    let owner: UserId = parse_id(&user_id)?;
    let rule_id: RuleId = parse_id(&rule_id)?;
    state.rule_service.remove_rule(owner, rule_id).await?;
    Ok(DeleteResponse::NoContent)
}
