//! Driven port for credential persistence.

use async_trait::async_trait;

use crate::domain::{Credential, CredentialId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential repository adapters.
    pub enum CredentialRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "credential repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "credential repository query failed: {message}",
    }
}

/// Keyed store of [`Credential`] records.
///
/// Every method acts on a single record (or the whole set for
/// [`find_all`](Self::find_all) and [`clear`](Self::clear)); adapters only
/// guarantee single-record atomicity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Persist a new record.
    async fn insert(&self, credential: &Credential) -> Result<(), CredentialRepositoryError>;

    /// Every record, newest first.
    async fn find_all(&self) -> Result<Vec<Credential>, CredentialRepositoryError>;

    async fn find_by_id(
        &self,
        id: &CredentialId,
    ) -> Result<Option<Credential>, CredentialRepositoryError>;

    /// Overwrite the stored name of `credential`.
    ///
    /// Returns `false` when no record with that id exists.
    async fn update(&self, credential: &Credential) -> Result<bool, CredentialRepositoryError>;

    /// Remove a record and hand back what was stored.
    async fn delete_by_id(
        &self,
        id: &CredentialId,
    ) -> Result<Option<Credential>, CredentialRepositoryError>;

    /// Remove every record.
    async fn clear(&self) -> Result<(), CredentialRepositoryError>;
}
