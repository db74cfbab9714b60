//! Data access layer: Postgres connection pooling, a generic repository
//! over one entity type, a soft-delete decorator, and the unit of work
//! that scopes one transaction per request.
//!
//! The unit of work owns the transaction boundary exclusively;
//! repositories borrow it and can never commit or roll back on their own.

pub mod error;
pub mod postgres;
pub mod repository;
pub mod soft_delete;
pub mod unit_of_work;

pub use error::DataError;
pub use postgres::{connect, connect_from_config, PostgresConfig};
pub use repository::BaseRepository;
pub use soft_delete::{SoftDeleteEntity, SoftDeleteRepository};
pub use unit_of_work::UnitOfWork;
