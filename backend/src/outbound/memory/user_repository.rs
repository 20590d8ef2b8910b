//! `HashMap`-backed user store with a username index.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserAccount, UserId, Username};

#[derive(Debug, Default)]
struct Accounts {
    by_id: HashMap<UserId, UserAccount>,
    by_username: HashMap<Username, UserId>,
}

/// User store living in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: RwLock<Accounts>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = self.accounts.write().await;
        let username = account.user.username();
        if accounts.by_username.contains_key(username) {
            return Err(UserPersistenceError::duplicate_username(username.as_ref()));
        }
        let id = *account.user.id();
        accounts.by_username.insert(username.clone(), id);
        accounts.by_id.insert(id, account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self.accounts.read().await.by_id.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .by_username
            .get(username)
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let accounts = self.accounts.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| accounts.by_id.get(id))
            .map(|account| account.user.clone())
            .collect())
    }

    async fn clear(&self) -> Result<(), UserPersistenceError> {
        let mut accounts = self.accounts.write().await;
        accounts.by_id.clear();
        accounts.by_username.clear();
        Ok(())
    }
}
