use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Classified data-access failure.
///
/// Uniqueness violations are surfaced as a distinct conflict condition so
/// callers can map them to a 409; connection failures (including pool
/// checkout timeouts) map to a 503-equivalent. Everything else passes
/// through unclassified.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("resource already exists or violates a uniqueness constraint")]
    Conflict(#[source] DbErr),

    #[error("database unavailable")]
    Unavailable(#[source] DbErr),

    #[error(transparent)]
    Other(DbErr),
}

impl DataError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, DataError::Conflict(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, DataError::Unavailable(_))
    }
}

impl From<DbErr> for DataError {
    fn from(err: DbErr) -> Self {
        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            return DataError::Conflict(err);
        }

        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => DataError::Unavailable(err),
            other => DataError::Other(other),
        }
    }
}
