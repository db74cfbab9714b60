use database::UnitOfWork;
use events::EventPublisher;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{hash_password, AuthenticatedUser, JwtAuth};
use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, NewUser, TokenResponse, UserCreatedEvent, UserResponse};
use crate::repository::UserStore;

/// Service layer for user business logic.
///
/// Each operation opens its own unit of work; the event for a created
/// user is published only after that unit of work has committed.
#[derive(Clone)]
pub struct UserService {
    db: DatabaseConnection,
    jwt: JwtAuth,
    publisher: EventPublisher,
    user_created_subject: Option<String>,
}

impl UserService {
    pub fn new(
        db: DatabaseConnection,
        jwt: JwtAuth,
        publisher: EventPublisher,
        user_created_subject: Option<String>,
    ) -> Self {
        Self {
            db,
            jwt,
            publisher,
            user_created_subject,
        }
    }

    /// Create a new user with a hashed password.
    ///
    /// `created_by` is the acting admin, recorded in the audit columns
    /// and as the event requestor.
    pub async fn create_user(
        &self,
        input: CreateUser,
        created_by: &str,
    ) -> UserResult<UserResponse> {
        let password_hash = hash_password(&input.password)?;
        let new_user = NewUser::from_input(input, password_hash, created_by);

        let uow = UnitOfWork::begin(&self.db).await?;
        let created = uow.users().add(new_user).await?;
        uow.commit().await?;

        info!(email = %created.email, "User created");

        match &self.user_created_subject {
            Some(subject) => {
                self.publisher
                    .publish(
                        subject,
                        "UserCreated",
                        created_by,
                        UserCreatedEvent::from(&created),
                    )
                    .await;
            }
            None => warn!("No subject configured for user-created events, not publishing"),
        }

        Ok(created.into())
    }

    /// Fetch a user by id.
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let user = uow.users().get(id).await?.ok_or(UserError::NotFound(id))?;
        Ok(user.into())
    }

    /// Soft-delete a user, recording the acting admin.
    pub async fn delete_user(&self, id: Uuid, deleted_by: &str) -> UserResult<()> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let affected = uow.users().delete(id, deleted_by).await?;
        if affected == 0 {
            return Err(UserError::NotFound(id));
        }
        uow.commit().await?;

        info!(user_id = %id, deleted_by = %deleted_by, "User deleted");
        Ok(())
    }

    /// Verify credentials and issue a token.
    pub async fn authenticate(&self, email: &str, password: &str) -> UserResult<TokenResponse> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let user = uow
            .users()
            .get_authenticated_user(email, password)
            .await?
            .ok_or(UserError::Unauthenticated)?;

        let token = self.jwt.create_token(&user.email, user.role)?;
        Ok(TokenResponse::bearer(token))
    }

    /// Verify a bearer token and resolve the caller.
    ///
    /// The subject must still exist as a live user: tokens of deleted
    /// users stop working immediately. The role comes from the database,
    /// not the token, so role changes take effect on the next request.
    pub async fn resolve_identity(&self, token: &str) -> UserResult<AuthenticatedUser> {
        let claims = self.jwt.decode_token(token)?;

        let uow = UnitOfWork::begin(&self.db).await?;
        let user = uow
            .users()
            .get_by_email(&claims.sub)
            .await?
            .ok_or(UserError::Unauthenticated)?;

        Ok(AuthenticatedUser {
            user_name: user.email,
            role: user.role,
        })
    }
}
