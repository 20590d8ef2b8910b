//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between internal Diesel rows (`models.rs`,
//! `schema.rs`) and domain types; no business rules live here. Connections
//! come from a `bb8` pool over `diesel-async`, and every database failure is
//! mapped onto the owning port's error enum.
//!
//! # Example
//!
//! ```ignore
//! use credentials_backend::outbound::persistence::{DbPool, DieselCredentialRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/credentials")).await?;
//! let repo = DieselCredentialRepository::new(pool);
//! ```

mod diesel_credential_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_credential_repository::DieselCredentialRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
