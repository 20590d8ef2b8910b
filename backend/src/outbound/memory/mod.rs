//! In-process store adapters.
//!
//! Used when no database is configured and by the integration test harness.
//! Each operation holds the lock for its own duration only.

mod credential_repository;
mod user_repository;

pub use credential_repository::InMemoryCredentialRepository;
pub use user_repository::InMemoryUserRepository;
