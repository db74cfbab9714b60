//! Repositories for interacting with the users domain.

use database::{DataError, SoftDeleteRepository, UnitOfWork};
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseTransaction};
use uuid::Uuid;

use crate::auth::verify_password;
use crate::entity::{self, Column, Entity as Users};
use crate::models::NewUser;

/// Typed access to user records. Soft-delete aware: reads never see
/// tombstoned users and deletes tombstone instead of removing.
pub struct UserRepository<'c, C> {
    inner: SoftDeleteRepository<'c, C, Users>,
}

impl<'c, C: ConnectionTrait> UserRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self {
            inner: SoftDeleteRepository::new(conn),
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<entity::Model>, DataError> {
        self.inner.get(id).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<entity::Model>, DataError> {
        self.inner.get_one(vec![Column::Email.eq(email)]).await
    }

    pub async fn list(&self) -> Result<Vec<entity::Model>, DataError> {
        self.inner.list(vec![]).await
    }

    pub async fn add(&self, user: NewUser) -> Result<entity::Model, DataError> {
        self.inner.add(user).await
    }

    /// Tombstone a user, recording who deleted them. Returns the number
    /// of rows affected (0 if absent or already deleted).
    pub async fn delete(&self, id: Uuid, deleted_by: &str) -> Result<u64, DataError> {
        self.inner
            .delete(vec![Column::Id.eq(id)], deleted_by)
            .await
    }

    /// Look up a user by email and verify the password.
    ///
    /// Returns `None` for both unknown email and wrong password; callers
    /// cannot distinguish the two.
    pub async fn get_authenticated_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<entity::Model>, DataError> {
        let Some(user) = self.get_by_email(email).await? else {
            return Ok(None);
        };

        if verify_password(password, &user.password) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}

/// Gives a unit of work access to the users repository.
pub trait UserStore {
    fn users(&self) -> UserRepository<'_, DatabaseTransaction>;
}

impl UserStore for UnitOfWork {
    fn users(&self) -> UserRepository<'_, DatabaseTransaction> {
        UserRepository::new(self.connection())
    }
}
