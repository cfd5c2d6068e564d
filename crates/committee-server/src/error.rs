//! Error types for the HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use committee_core::CommitteeError;
use serde_json::json;
use thiserror::Error;

/// Errors returned by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No solution is stored under the requested id.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request could not be understood.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The problem is invalid, e.g. duplicated participant names.
    #[error(transparent)]
    Domain(#[from] CommitteeError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Domain(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        let domain = ApiError::from(CommitteeError::DuplicatePersonName("Ann".into()));
        assert_eq!(domain.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            domain.to_string(),
            "All persons must have a unique name (duplicated: Ann)"
        );
    }
}
