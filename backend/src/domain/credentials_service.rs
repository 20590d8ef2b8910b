//! Credential domain service implementing the credential driving ports.
//!
//! Reads are public; mutations take the acting user and enforce ownership
//! before touching the store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    CredentialRepository, CredentialRepositoryError, CredentialsCommand, CredentialsQuery,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Credential, CredentialId, CredentialName, CredentialView, Error, NOT_LOGGED_IN, UserId,
    UserSummary,
};

/// Message returned for unknown credential ids.
pub const CREDENTIAL_NOT_FOUND: &str = "Credential not found";
/// Message returned when the actor does not own the record.
pub const NOT_AUTHORIZED: &str = "User is not authorized";

/// Credential service backed by a credential store and a user store.
#[derive(Clone)]
pub struct CredentialService<C, U> {
    credentials: Arc<C>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<C, U> CredentialService<C, U> {
    /// Create a service over the given stores.
    pub fn new(credentials: Arc<C>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            credentials,
            users,
            clock,
        }
    }
}

pub(crate) fn map_credential_error(error: CredentialRepositoryError) -> Error {
    match error {
        CredentialRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("credential repository unavailable: {message}"))
        }
        CredentialRepositoryError::Query { message } => {
            Error::internal(format!("credential repository error: {message}"))
        }
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::internal(format!("unexpected username conflict for {username}"))
        }
    }
}

impl<C, U> CredentialService<C, U>
where
    C: CredentialRepository,
    U: UserRepository,
{
    async fn owner_summary(&self, credential: &Credential) -> Result<Option<UserSummary>, Error> {
        let Some(owner) = credential.owner() else {
            return Ok(None);
        };
        let account = self.users.find_by_id(owner).await.map_err(map_user_error)?;
        Ok(account.map(|account| account.user.summary()))
    }

    async fn view(&self, credential: Credential) -> Result<CredentialView, Error> {
        let owner = self.owner_summary(&credential).await?;
        Ok(CredentialView::new(credential, owner))
    }

    /// Resolve the session's user; a user who no longer exists is signed out.
    async fn acting_user(&self, actor: &UserId) -> Result<UserSummary, Error> {
        let Some(account) = self.users.find_by_id(actor).await.map_err(map_user_error)? else {
            debug!(actor = %actor, "session names an unknown user");
            return Err(Error::unauthorized(NOT_LOGGED_IN));
        };
        Ok(account.user.summary())
    }

    /// Load a record the actor is allowed to modify, with its owner summary.
    async fn load_modifiable(
        &self,
        actor: &UserId,
        id: &CredentialId,
    ) -> Result<(Credential, Option<UserSummary>), Error> {
        let summary = self.acting_user(actor).await?;
        let credential = self
            .credentials
            .find_by_id(id)
            .await
            .map_err(map_credential_error)?
            .ok_or_else(|| Error::not_found(CREDENTIAL_NOT_FOUND))?;
        if !credential.is_modifiable_by(actor) {
            debug!(credential_id = %id, actor = %actor, "rejected mutation by non-owner");
            return Err(Error::forbidden(NOT_AUTHORIZED));
        }
        // Modifiable records are either owner-less or owned by the actor.
        let owner = credential.owner().map(|_| summary);
        Ok((credential, owner))
    }
}

#[async_trait]
impl<C, U> CredentialsQuery for CredentialService<C, U>
where
    C: CredentialRepository,
    U: UserRepository,
{
    async fn list_credentials(&self) -> Result<Vec<CredentialView>, Error> {
        let credentials = self
            .credentials
            .find_all()
            .await
            .map_err(map_credential_error)?;

        let mut owner_ids: Vec<UserId> = credentials
            .iter()
            .filter_map(|credential| credential.owner().copied())
            .collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();

        let owners: HashMap<UserId, UserSummary> = if owner_ids.is_empty() {
            HashMap::new()
        } else {
            self.users
                .find_by_ids(&owner_ids)
                .await
                .map_err(map_user_error)?
                .into_iter()
                .map(|user| (*user.id(), user.summary()))
                .collect()
        };

        Ok(credentials
            .into_iter()
            .map(|credential| {
                let owner = credential
                    .owner()
                    .and_then(|id| owners.get(id))
                    .cloned();
                CredentialView::new(credential, owner)
            })
            .collect())
    }

    async fn get_credential(&self, id: &CredentialId) -> Result<CredentialView, Error> {
        let credential = self
            .credentials
            .find_by_id(id)
            .await
            .map_err(map_credential_error)?
            .ok_or_else(|| Error::not_found(CREDENTIAL_NOT_FOUND))?;
        self.view(credential).await
    }
}

#[async_trait]
impl<C, U> CredentialsCommand for CredentialService<C, U>
where
    C: CredentialRepository,
    U: UserRepository,
{
    async fn create_credential(
        &self,
        actor: &UserId,
        name: CredentialName,
    ) -> Result<CredentialView, Error> {
        let owner = self.acting_user(actor).await?;
        let credential = Credential::create(name, Some(*actor), self.clock.utc());
        self.credentials
            .insert(&credential)
            .await
            .map_err(map_credential_error)?;
        debug!(credential_id = %credential.id(), owner = %actor, "credential created");
        Ok(CredentialView::new(credential, Some(owner)))
    }

    async fn update_credential(
        &self,
        actor: &UserId,
        id: &CredentialId,
        name: CredentialName,
    ) -> Result<CredentialView, Error> {
        let (mut credential, owner) = self.load_modifiable(actor, id).await?;
        credential.rename(name);
        let updated = self
            .credentials
            .update(&credential)
            .await
            .map_err(map_credential_error)?;
        if !updated {
            return Err(Error::not_found(CREDENTIAL_NOT_FOUND));
        }
        Ok(CredentialView::new(credential, owner))
    }

    async fn delete_credential(
        &self,
        actor: &UserId,
        id: &CredentialId,
    ) -> Result<CredentialView, Error> {
        let (_, owner) = self.load_modifiable(actor, id).await?;
        let removed = self
            .credentials
            .delete_by_id(id)
            .await
            .map_err(map_credential_error)?
            .ok_or_else(|| Error::not_found(CREDENTIAL_NOT_FOUND))?;
        debug!(credential_id = %id, actor = %actor, "credential deleted");
        Ok(CredentialView::new(removed, owner))
    }
}

#[cfg(test)]
#[path = "credentials_service_tests.rs"]
mod tests;
