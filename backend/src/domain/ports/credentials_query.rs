//! Driving port for public credential reads.

use async_trait::async_trait;

use crate::domain::{CredentialId, CredentialView, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialsQuery: Send + Sync {
    /// Every credential, newest first, with owners populated.
    async fn list_credentials(&self) -> Result<Vec<CredentialView>, Error>;

    /// A single credential; `not_found` when absent.
    async fn get_credential(&self, id: &CredentialId) -> Result<CredentialView, Error>;
}
