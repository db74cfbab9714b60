//! Users Domain
//!
//! Complete domain implementation for user management: CRUD with soft
//! deletion, Argon2 password hashing, JWT login, role-based access
//! control, and a post-commit `UserCreated` integration event.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, auth gating
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, one unit of work per operation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Soft-delete-aware data access
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Entity    │  ← SeaORM model for the `users` table
//! └─────────────┘
//! ```

pub mod auth;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use auth::{AuthenticatedUser, JwtAuth};
pub use entity::UserRole;
pub use error::{ApiError, UserError, UserResult};
pub use models::{CreateUser, LoginRequest, NewUser, TokenResponse, UserResponse};
pub use repository::{UserRepository, UserStore};
pub use service::UserService;
