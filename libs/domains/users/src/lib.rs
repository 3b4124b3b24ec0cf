//! Users Domain
//!
//! CRUD over the `users` table with soft delete.
//!
//! # Features
//!
//! - Create, read, partial update, soft delete and paginated listing
//! - Required-field validation before any storage call
//! - PostgreSQL repository (raw parameterized statements) and an in-memory one
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, status codes, JSON
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Validation  │  ← Required fields, id and pagination parsing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Delegation seam
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, UpdateUserInput, Conditions
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{InMemoryUserRepository, UserService, handlers};
//!
//! // Create repository and service
//! let repository = InMemoryUserRepository::new();
//! let service = UserService::new(repository);
//!
//! // Create Axum router
//! let router: axum::Router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{Conditions, ListQuery, UpdateUserInput, User};
pub use postgres::PostgresUserRepository;
pub use query::UserChanges;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
pub use validation::{parse_conditions, validate_update_user, validate_user};
