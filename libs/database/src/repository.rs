//! Generic typed data access for one entity type.
//!
//! Predicates are opaque boolean column expressions (`SimpleExpr`); every
//! operation ANDs the supplied predicates together. Supplying no
//! predicate to `list`/`delete`/`update` means "match everything", so
//! callers must be deliberate.

use std::marker::PhantomData;

use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, Condition, ConnectionTrait, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait, QueryFilter, Value,
};

use crate::error::DataError;

/// AND a set of column predicates into a single condition.
///
/// An empty set yields an unrestricted condition matching every row.
pub(crate) fn and_all(filters: impl IntoIterator<Item = SimpleExpr>) -> Condition {
    filters
        .into_iter()
        .fold(Condition::all(), |cond, f| cond.add(f))
}

/// Generic CRUD gateway over one entity type.
///
/// Borrows the connection (normally the unit of work's transaction), so a
/// repository can never outlive its transaction nor commit it.
pub struct BaseRepository<'c, C, E> {
    conn: &'c C,
    entity: PhantomData<E>,
}

impl<'c, C, E> BaseRepository<'c, C, E>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    pub fn new(conn: &'c C) -> Self {
        Self {
            conn,
            entity: PhantomData,
        }
    }

    /// Look up a record by primary key.
    pub async fn get(
        &self,
        pk: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Result<Option<E::Model>, DataError> {
        Ok(E::find_by_id(pk).one(self.conn).await?)
    }

    /// List all records matching every supplied predicate.
    pub async fn list(&self, filters: Vec<SimpleExpr>) -> Result<Vec<E::Model>, DataError> {
        Ok(E::find().filter(and_all(filters)).all(self.conn).await?)
    }

    /// First record matching every supplied predicate, if any.
    ///
    /// The usual tool for uniqueness lookups (e.g. by email).
    pub async fn get_one(&self, filters: Vec<SimpleExpr>) -> Result<Option<E::Model>, DataError> {
        Ok(E::find().filter(and_all(filters)).one(self.conn).await?)
    }

    /// Stage a new entity built from a validated input object.
    ///
    /// The INSERT executes on the open transaction with RETURNING, so
    /// generated keys are assigned on the returned model while the row
    /// stays uncommitted until the unit of work commits.
    pub async fn add<A>(&self, input: A) -> Result<E::Model, DataError>
    where
        A: IntoActiveModel<E::ActiveModel> + Send,
        E::ActiveModel: ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<E::ActiveModel>,
    {
        Ok(input.into_active_model().insert(self.conn).await?)
    }

    /// Physically remove all records matching the predicates.
    ///
    /// Returns the number of rows removed.
    pub async fn delete(&self, filters: Vec<SimpleExpr>) -> Result<u64, DataError> {
        let res = E::delete_many()
            .filter(and_all(filters))
            .exec(self.conn)
            .await?;
        Ok(res.rows_affected)
    }

    /// Apply `values` to every record matching all `conditions`.
    ///
    /// Returns the updated records.
    pub async fn update(
        &self,
        conditions: Vec<SimpleExpr>,
        values: Vec<(E::Column, Value)>,
    ) -> Result<Vec<E::Model>, DataError> {
        let mut stmt = E::update_many().filter(and_all(conditions));
        for (col, value) in values {
            stmt = stmt.col_expr(col, Expr::value(value));
        }
        Ok(stmt.exec_with_returning(self.conn).await?)
    }

    pub(crate) fn conn(&self) -> &'c C {
        self.conn
    }
}
