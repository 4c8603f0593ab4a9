//! HTTP error response mapping.

use std::str::FromStr;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use rulekeeper_domain::error::{MalformedIdentifierError, RuleKeeperError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`RuleKeeperError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(RuleKeeperError);

impl From<RuleKeeperError> for ApiError {
    fn from(err: RuleKeeperError) -> Self {
        Self(err)
    }
}

impl From<MalformedIdentifierError> for ApiError {
    fn from(err: MalformedIdentifierError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            RuleKeeperError::MalformedEntity(_) | RuleKeeperError::MalformedIdentifier(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            RuleKeeperError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            RuleKeeperError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Parse a path segment into an identifier newtype.
pub(crate) fn parse_id<T>(value: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = MalformedIdentifierError>,
{
    Ok(T::from_str(value)?)
}
