//! Uniform error envelope returned by every error path of the API.
//!
//! Clients can always parse `status`/`title`/`errors` regardless of the
//! failure cause.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single, human-readable error message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Standardized error response body.
///
/// Every error, from validation failures to infrastructure outages, is
/// rendered through this shape.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub title: String,
    pub path: String,
    pub errors: Vec<ErrorDetail>,
}

impl ErrorResponse {
    pub fn new(
        status: StatusCode,
        title: impl Into<String>,
        path: impl Into<String>,
        errors: Vec<ErrorDetail>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            title: title.into(),
            path: path.into(),
            errors,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let body = ErrorResponse::new(
            StatusCode::NOT_FOUND,
            "Not found",
            "/users/123",
            vec![ErrorDetail::new("no such user")],
        );

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["title"], "Not found");
        assert_eq!(json["path"], "/users/123");
        assert_eq!(json["errors"][0]["detail"], "no such user");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_into_response_status() {
        let body = ErrorResponse::new(StatusCode::CONFLICT, "Integrity Error", "/users", vec![]);
        let response = body.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
