//! Utilities shared by the HTTP layer: the uniform error envelope and a
//! JSON extractor with automatic validation.

pub mod errors;
pub mod extractors;

pub use errors::{ErrorDetail, ErrorResponse};
pub use extractors::ValidatedJson;

/// Extract a bearer token from the `Authorization` header.
pub fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
}
