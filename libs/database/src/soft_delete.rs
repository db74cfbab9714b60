//! Soft deletion as a decorator over [`BaseRepository`].
//!
//! Entities opt in by nominating their tombstone columns. Every read and
//! update is scoped to live rows (`deleted_by IS NULL`), and `delete`
//! becomes an UPDATE that stamps both tombstone columns in one statement.

use chrono::Utc;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelBehavior, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait, QueryFilter, Value,
};

use crate::error::DataError;
use crate::repository::{and_all, BaseRepository};

/// An entity carrying tombstone columns.
///
/// `deleted_by` is the liveness discriminator: a row is live exactly when
/// it is NULL. `deleted_at` records when the tombstone was written; the
/// two are always set together.
pub trait SoftDeleteEntity: EntityTrait {
    fn deleted_at_column() -> Self::Column;
    fn deleted_by_column() -> Self::Column;

    /// Predicate selecting live rows.
    fn not_deleted() -> SimpleExpr {
        Self::deleted_by_column().is_null()
    }
}

/// Repository whose reads see only live rows and whose deletes tombstone
/// instead of removing.
pub struct SoftDeleteRepository<'c, C, E> {
    inner: BaseRepository<'c, C, E>,
}

impl<'c, C, E> SoftDeleteRepository<'c, C, E>
where
    C: ConnectionTrait,
    E: SoftDeleteEntity,
{
    pub fn new(conn: &'c C) -> Self {
        Self {
            inner: BaseRepository::new(conn),
        }
    }

    /// Look up a live record by primary key.
    ///
    /// A tombstoned row is indistinguishable from an absent one.
    pub async fn get(
        &self,
        pk: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Result<Option<E::Model>, DataError> {
        Ok(E::find_by_id(pk)
            .filter(E::not_deleted())
            .one(self.inner.conn())
            .await?)
    }

    /// List live records matching every supplied predicate.
    pub async fn list(&self, mut filters: Vec<SimpleExpr>) -> Result<Vec<E::Model>, DataError> {
        filters.push(E::not_deleted());
        self.inner.list(filters).await
    }

    /// First live record matching every supplied predicate, if any.
    pub async fn get_one(
        &self,
        mut filters: Vec<SimpleExpr>,
    ) -> Result<Option<E::Model>, DataError> {
        filters.push(E::not_deleted());
        self.inner.get_one(filters).await
    }

    /// Stage a new entity. Insertion is unaffected by soft deletion.
    pub async fn add<A>(&self, input: A) -> Result<E::Model, DataError>
    where
        A: IntoActiveModel<E::ActiveModel> + Send,
        E::ActiveModel: ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<E::ActiveModel>,
    {
        self.inner.add(input).await
    }

    /// Tombstone all live records matching the predicates.
    ///
    /// Issues a single UPDATE stamping `deleted_at` and `deleted_by`
    /// together; already-deleted rows are untouched, so repeating a
    /// delete affects zero rows. Returns the number tombstoned.
    pub async fn delete(
        &self,
        filters: Vec<SimpleExpr>,
        deleted_by: &str,
    ) -> Result<u64, DataError> {
        let res = E::update_many()
            .col_expr(E::deleted_at_column(), Expr::value(Utc::now()))
            .col_expr(E::deleted_by_column(), Expr::value(deleted_by))
            .filter(and_all(filters).add(E::not_deleted()))
            .exec(self.inner.conn())
            .await?;
        Ok(res.rows_affected)
    }

    /// Apply `values` to every live record matching all `conditions`.
    pub async fn update(
        &self,
        mut conditions: Vec<SimpleExpr>,
        values: Vec<(E::Column, Value)>,
    ) -> Result<Vec<E::Model>, DataError> {
        conditions.push(E::not_deleted());
        self.inner.update(conditions, values).await
    }
}
