//! Driving port for credential mutations.
//!
//! Every operation takes the acting user explicitly; inbound adapters resolve
//! it from the session before calling in.

use async_trait::async_trait;

use crate::domain::{CredentialId, CredentialName, CredentialView, Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialsCommand: Send + Sync {
    /// Create a credential owned by `actor`.
    async fn create_credential(
        &self,
        actor: &UserId,
        name: CredentialName,
    ) -> Result<CredentialView, Error>;

    /// Rename a credential.
    ///
    /// Fails with `not_found` for unknown ids and `forbidden` when another
    /// user owns the record.
    async fn update_credential(
        &self,
        actor: &UserId,
        id: &CredentialId,
        name: CredentialName,
    ) -> Result<CredentialView, Error>;

    /// Delete a credential, returning its last representation.
    ///
    /// Same ownership rules as [`update_credential`](Self::update_credential).
    async fn delete_credential(
        &self,
        actor: &UserId,
        id: &CredentialId,
    ) -> Result<CredentialView, Error>;
}
