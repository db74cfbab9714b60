use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entity;
pub use crate::entity::UserRole;

/// DTO for creating a new user.
///
/// Field limits mirror the column definitions; validation runs before the
/// request reaches the service layer.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(max = 50))]
    pub last_name: Option<String>,
    #[validate(email, length(max = 100))]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub password: String,
    #[validate(length(min = 1, max = 15))]
    pub phone: String,
    pub address: Option<serde_json::Value>,
    pub role: UserRole,
}

/// DTO for user login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email, length(max = 100))]
    pub email: String,
    pub password: String,
}

/// Response after successful login
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(token: String) -> Self {
        Self {
            token,
            token_type: "bearer".to_string(),
        }
    }
}

/// User response DTO (without the password hash)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub address: Option<serde_json::Value>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::Model> for UserResponse {
    fn from(user: entity::Model) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Insertable user, built by the service layer.
///
/// Carries the already-hashed password and the audit actor; key and
/// timestamps are assigned on conversion.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub address: Option<serde_json::Value>,
    pub role: UserRole,
    pub actor: String,
}

impl NewUser {
    pub fn from_input(input: CreateUser, password_hash: String, actor: &str) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash,
            phone: input.phone,
            address: input.address,
            role: input.role,
            actor: actor.to_string(),
        }
    }
}

impl IntoActiveModel<entity::ActiveModel> for NewUser {
    fn into_active_model(self) -> entity::ActiveModel {
        let now = Utc::now();
        entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            email: Set(self.email),
            password: Set(self.password_hash),
            phone: Set(self.phone),
            address: Set(self.address),
            role: Set(self.role),
            created_at: Set(now),
            created_by: Set(self.actor.clone()),
            updated_at: Set(now),
            updated_by: Set(self.actor),
            deleted_at: Set(None),
            deleted_by: Set(None),
        }
    }
}

/// Payload of the event published after a user is created.
#[derive(Debug, Clone, Serialize)]
pub struct UserCreatedEvent {
    pub email: String,
    pub phone: String,
}

impl From<&entity::Model> for UserCreatedEvent {
    fn from(user: &entity::Model) -> Self {
        Self {
            email: user.email.clone(),
            phone: user.phone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    fn create_input() -> CreateUser {
        CreateUser {
            first_name: "Kittu".to_string(),
            last_name: None,
            email: "kittu@example.com".to_string(),
            password: "secret123".to_string(),
            phone: "1234567890".to_string(),
            address: Some(serde_json::json!({"city": "Bangalore"})),
            role: UserRole::Customer,
        }
    }

    #[test]
    fn test_create_user_validates() {
        assert!(create_input().validate().is_ok());

        let mut bad_email = create_input();
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate().is_err());

        let mut long_phone = create_input();
        long_phone.phone = "1".repeat(16);
        assert!(long_phone.validate().is_err());
    }

    #[test]
    fn test_new_user_assigns_key_audit_and_clean_tombstones() {
        let new_user = NewUser::from_input(
            create_input(),
            "$argon2id$fake".to_string(),
            "admin@example.com",
        );
        let active = new_user.into_active_model();

        assert!(matches!(active.id, ActiveValue::Set(_)));
        assert_eq!(active.password, ActiveValue::Set("$argon2id$fake".to_string()));
        assert_eq!(
            active.created_by,
            ActiveValue::Set("admin@example.com".to_string())
        );
        assert_eq!(
            active.updated_by,
            ActiveValue::Set("admin@example.com".to_string())
        );
        assert_eq!(active.deleted_at, ActiveValue::Set(None));
        assert_eq!(active.deleted_by, ActiveValue::Set(None));
    }

    #[test]
    fn test_user_response_has_no_password_field() {
        let response = UserResponse {
            id: Uuid::new_v4(),
            first_name: "Kittu".to_string(),
            last_name: None,
            email: "kittu@example.com".to_string(),
            phone: "1234567890".to_string(),
            address: None,
            role: UserRole::Customer,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "CUSTOMER");
    }
}
