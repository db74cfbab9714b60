use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{bearer_token, ValidatedJson};
use uuid::Uuid;

use crate::auth::{require_role, AuthenticatedUser};
use crate::entity::UserRole;
use crate::error::{ApiError, UserError};
use crate::models::{CreateUser, LoginRequest, TokenResponse, UserResponse};
use crate::service::UserService;

/// Users router with all HTTP endpoints.
pub fn router(service: UserService) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/login", post(login))
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user).delete(delete_user))
        .with_state(shared_service)
}

/// Resolve the caller from the Authorization header and check their role.
async fn authorize(
    service: &UserService,
    headers: &HeaderMap,
    role: UserRole,
    path: &str,
) -> Result<AuthenticatedUser, ApiError> {
    let token = bearer_token(headers).ok_or_else(|| UserError::Unauthenticated.at(path))?;
    let identity = service
        .resolve_identity(token)
        .await
        .map_err(|e| e.at(path))?;
    require_role(&identity, role).map_err(|e| e.at(path))?;
    Ok(identity)
}

/// User login
///
/// POST /login
async fn login(
    State(service): State<Arc<UserService>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = service
        .authenticate(&input.email, &input.password)
        .await
        .map_err(|e| e.at(uri.path()))?;
    Ok(Json(token))
}

/// Create a new user (admin only)
///
/// POST /users
async fn create_user(
    State(service): State<Arc<UserService>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> Result<impl IntoResponse, ApiError> {
    let path = uri.path();
    let admin = authorize(&service, &headers, UserRole::Admin, path).await?;

    let user = service
        .create_user(input, &admin.user_name)
        .await
        .map_err(|e| e.at(path))?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Fetch a user by id
///
/// GET /users/:id
async fn get_user(
    State(service): State<Arc<UserService>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = service.get_user(id).await.map_err(|e| e.at(uri.path()))?;
    Ok(Json(user))
}

/// Soft-delete a user (admin only)
///
/// DELETE /users/:id
async fn delete_user(
    State(service): State<Arc<UserService>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let path = uri.path();
    let admin = authorize(&service, &headers, UserRole::Admin, path).await?;

    service
        .delete_user(id, &admin.user_name)
        .await
        .map_err(|e| e.at(path))?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{hash_password, JwtAuth};
    use crate::entity;
    use chrono::Utc;
    use core_config::JwtConfig;
    use events::EventPublisher;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use tower::ServiceExt;

    fn jwt() -> JwtAuth {
        JwtAuth::new(&JwtConfig {
            secret: "test-secret".to_string(),
            ttl_secs: 1800,
        })
    }

    fn app(db: DatabaseConnection) -> Router {
        router(UserService::new(db, jwt(), EventPublisher::disabled(), None))
    }

    fn stored_user(email: &str, role: UserRole) -> entity::Model {
        let now = Utc::now();
        entity::Model {
            id: Uuid::new_v4(),
            first_name: "Kittu".to_string(),
            last_name: None,
            email: email.to_string(),
            password: hash_password("secret123").unwrap(),
            phone: "1234567890".to_string(),
            address: None,
            role,
            created_at: now,
            created_by: "admin@example.com".to_string(),
            updated_at: now,
            updated_by: "admin@example.com".to_string(),
            deleted_at: None,
            deleted_by: None,
        }
    }

    fn create_body() -> String {
        serde_json::json!({
            "first_name": "Kittu",
            "email": "kittu@example.com",
            "password": "secret123",
            "phone": "1234567890",
            "role": "CUSTOMER",
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_create_user_without_token_is_unauthorized() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let response = app(db)
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/users")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(create_body()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_user_as_customer_is_forbidden() {
        let token = jwt()
            .create_token("kittu@example.com", UserRole::Customer)
            .unwrap();
        // Identity lookup during authorization.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_user("kittu@example.com", UserRole::Customer)]])
            .into_connection();

        let response = app(db)
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/users")
                    .header("content-type", "application/json")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(axum::body::Body::from(create_body()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["title"], "Forbidden");
        assert_eq!(body["path"], "/users");
    }

    #[tokio::test]
    async fn test_invalid_payload_is_unprocessable() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let response = app(db)
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(
                        r#"{"email": "not-an-email", "password": "x"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["title"], "Invalid request payload");
    }
}
