//! JSON extractor with automatic validation using the validator crate.

use crate::errors::{ErrorDetail, ErrorResponse};
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that validates the body with the `Validate` trait.
///
/// Malformed JSON and field-level validation failures both render as a
/// 422 error envelope titled "Invalid request payload", with one
/// `ErrorDetail` per offending attribute.
///
/// # Example
/// ```ignore
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUser>) { /* ... */ }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = req.uri().path().to_string();

        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|e| {
            ErrorResponse::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid request payload",
                path.clone(),
                vec![ErrorDetail::new(e.body_text())],
            )
            .into_response()
        })?;

        data.validate().map_err(|e| {
            let mut errors: Vec<ErrorDetail> = e
                .field_errors()
                .iter()
                .map(|(field, _)| ErrorDetail::new(format!("Invalid attribute '{}'", field)))
                .collect();
            // Deterministic ordering for clients and tests.
            errors.sort_by(|a, b| a.detail.cmp(&b.detail));

            ErrorResponse::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid request payload",
                path.clone(),
                errors,
            )
            .into_response()
        })?;

        Ok(ValidatedJson(data))
    }
}
