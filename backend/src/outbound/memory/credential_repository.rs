//! `HashMap`-backed credential store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{CredentialRepository, CredentialRepositoryError};
use crate::domain::{Credential, CredentialId};

/// Credential store living in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCredentialRepository {
    records: RwLock<HashMap<CredentialId, Credential>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn insert(&self, credential: &Credential) -> Result<(), CredentialRepositoryError> {
        let mut records = self.records.write().await;
        if records.contains_key(&credential.id()) {
            return Err(CredentialRepositoryError::query(format!(
                "credential {} already exists",
                credential.id()
            )));
        }
        records.insert(credential.id(), credential.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Credential>, CredentialRepositoryError> {
        let mut all: Vec<Credential> = self.records.read().await.values().cloned().collect();
        // Ties on the timestamp fall back to id so the order is stable.
        all.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(all)
    }

    async fn find_by_id(
        &self,
        id: &CredentialId,
    ) -> Result<Option<Credential>, CredentialRepositoryError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn update(&self, credential: &Credential) -> Result<bool, CredentialRepositoryError> {
        let mut records = self.records.write().await;
        let Some(stored) = records.get_mut(&credential.id()) else {
            return Ok(false);
        };
        stored.rename(credential.name().clone());
        Ok(true)
    }

    async fn delete_by_id(
        &self,
        id: &CredentialId,
    ) -> Result<Option<Credential>, CredentialRepositoryError> {
        Ok(self.records.write().await.remove(id))
    }

    async fn clear(&self) -> Result<(), CredentialRepositoryError> {
        self.records.write().await.clear();
        Ok(())
    }
}
