use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::errors::{ErrorDetail, ErrorResponse};
use database::DataError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("Resource already exists or violates constraints")]
    Conflict,

    #[error("Unable to authenticate user")]
    Unauthenticated,

    #[error("User is not authorized to perform this action")]
    Forbidden,

    #[error("Database unavailable")]
    Unavailable,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// Attach the request path, producing a response-ready error.
    pub fn at(self, path: &str) -> ApiError {
        ApiError {
            error: self,
            path: path.to_string(),
        }
    }
}

impl From<DataError> for UserError {
    fn from(err: DataError) -> Self {
        if err.is_conflict() {
            UserError::Conflict
        } else if err.is_unavailable() {
            UserError::Unavailable
        } else {
            UserError::Internal(err.to_string())
        }
    }
}

/// A domain error bound to the request path it occurred on.
///
/// Rendered as the standard error envelope.
#[derive(Debug)]
pub struct ApiError {
    pub error: UserError,
    pub path: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, title, details): (StatusCode, &str, Vec<String>) = match &self.error {
            UserError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found", vec![]),
            UserError::Conflict => (
                StatusCode::CONFLICT,
                "Integrity Error",
                vec!["Resource already exists or violates constraints".to_string()],
            ),
            UserError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "Unable to authenticate user.",
                vec!["Username or password is not valid.".to_string()],
            ),
            UserError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Forbidden",
                vec!["User is not authorized to perform this action.".to_string()],
            ),
            UserError::Unavailable => {
                tracing::error!(path = %self.path, "Server unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Server unavailable, retry later.",
                    vec!["Check /status".to_string()],
                )
            }
            UserError::Internal(msg) => {
                tracing::error!(path = %self.path, error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    vec!["An internal error occurred.".to_string()],
                )
            }
        };

        let errors = details.into_iter().map(ErrorDetail::new).collect();
        ErrorResponse::new(status, title, &self.path, errors).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbErr, RuntimeErr};

    fn status_of(error: UserError) -> StatusCode {
        error.at("/users").into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(UserError::NotFound(Uuid::new_v4())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(UserError::Conflict), StatusCode::CONFLICT);
        assert_eq!(status_of(UserError::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(UserError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_of(UserError::Unavailable), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            status_of(UserError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_data_errors_are_classified() {
        let conflict: UserError =
            DataError::Conflict(DbErr::Custom("duplicate key".to_string())).into();
        assert!(matches!(conflict, UserError::Conflict));

        let unavailable: UserError =
            DataError::Unavailable(DbErr::Conn(RuntimeErr::Internal("refused".to_string()))).into();
        assert!(matches!(unavailable, UserError::Unavailable));

        let other: UserError = DataError::Other(DbErr::Custom("boom".to_string())).into();
        assert!(matches!(other, UserError::Internal(_)));
    }

    #[tokio::test]
    async fn test_conflict_envelope_body() {
        let response = UserError::Conflict.at("/users").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 409);
        assert_eq!(body["title"], "Integrity Error");
        assert_eq!(body["path"], "/users");
        assert_eq!(
            body["errors"][0]["detail"],
            "Resource already exists or violates constraints"
        );
    }
}
