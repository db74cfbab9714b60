//! Transaction scope handing out repositories bound to one transaction.

use sea_orm::{DatabaseConnection, DatabaseTransaction, EntityTrait, TransactionTrait};
use tracing::{debug, warn};

use crate::error::DataError;
use crate::repository::BaseRepository;
use crate::soft_delete::{SoftDeleteEntity, SoftDeleteRepository};

/// A single atomic unit of business work.
///
/// Opens one transaction and lends it to every repository created from
/// this scope, so all their operations commit or roll back together.
/// Nothing persists unless [`commit`](Self::commit) is called: dropping
/// the scope (early return, error, panic) rolls the transaction back.
pub struct UnitOfWork {
    txn: DatabaseTransaction,
}

impl UnitOfWork {
    /// Begin a new transaction on the shared pool.
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DataError> {
        let txn = db.begin().await?;
        Ok(Self { txn })
    }

    /// A plain repository for `E`, bound to this transaction.
    pub fn repository<E: EntityTrait>(&self) -> BaseRepository<'_, DatabaseTransaction, E> {
        BaseRepository::new(&self.txn)
    }

    /// A soft-delete repository for `E`, bound to this transaction.
    pub fn soft_repository<E: SoftDeleteEntity>(
        &self,
    ) -> SoftDeleteRepository<'_, DatabaseTransaction, E> {
        SoftDeleteRepository::new(&self.txn)
    }

    /// The raw transaction, for queries the repositories do not cover.
    pub fn connection(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Make all staged changes durable.
    pub async fn commit(self) -> Result<(), DataError> {
        self.txn.commit().await?;
        debug!("Transaction committed");
        Ok(())
    }

    /// Discard all staged changes explicitly.
    ///
    /// Dropping the scope has the same effect; this variant exists for
    /// call sites that want the rollback logged with intent.
    pub async fn rollback(self) -> Result<(), DataError> {
        self.txn.rollback().await?;
        warn!("Transaction rolled back");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_entity::{self, Entity as Items};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_commit_completes_the_scope() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![test_entity::item(1, "Kostas LTD", 3)]])
            .into_connection();

        let uow = UnitOfWork::begin(&db).await.unwrap();
        let repo = uow.repository::<Items>();
        let found = repo.get(1).await.unwrap();
        assert!(found.is_some());
        uow.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_explicit_rollback() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<test_entity::Model>::new()])
            .into_connection();

        let uow = UnitOfWork::begin(&db).await.unwrap();
        let repo = uow.soft_repository::<Items>();
        assert_eq!(repo.get(1).await.unwrap(), None);
        uow.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn test_drop_without_commit_is_allowed() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let uow = UnitOfWork::begin(&db).await.unwrap();
        drop(uow);
    }
}
