//! Account service: sign-in, sign-up and profile lookups over a user store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::SubsecRound;
use mockable::Clock;
use serde_json::json;
use tokio::task;
use tracing::{debug, info};

use crate::domain::credentials_service::map_user_error;
use crate::domain::ports::{
    INVALID_LOGIN_MESSAGE, LoginService, SignupService, USERNAME_TAKEN_MESSAGE,
    UserPersistenceError, UserProfileQuery, UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, PasswordDigest, PasswordError, SignupDetails, User, UserAccount,
    UserDraft, UserId, Username,
};

/// Message returned when a request needs a signed-in user and has none.
pub const NOT_LOGGED_IN: &str = "User is not logged in";

/// Account service implementing the authentication driving ports.
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> AccountService<U> {
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

fn map_password_error(error: PasswordError) -> Error {
    Error::internal(format!("password digest failure: {error}"))
}

fn map_join_error(error: task::JoinError) -> Error {
    Error::internal(format!("password task failed: {error}"))
}

/// Runs on the blocking pool.
async fn hash_password(plaintext: String) -> Result<PasswordDigest, Error> {
    task::spawn_blocking(move || PasswordDigest::hash(&plaintext))
        .await
        .map_err(map_join_error)?
        .map_err(map_password_error)
}

async fn verify_password(digest: PasswordDigest, plaintext: String) -> Result<bool, Error> {
    task::spawn_blocking(move || digest.verify(&plaintext))
        .await
        .map_err(map_join_error)
}

#[async_trait]
impl<U> LoginService for AccountService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        // Usernames that could never have been registered cannot match.
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        };
        let Some(UserAccount { user, password }) = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_error)?
        else {
            debug!(username = %username, "sign-in for unknown user");
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        };
        if !verify_password(password, credentials.password().to_owned()).await? {
            debug!(user_id = %user.id(), "sign-in with wrong password");
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        }
        Ok(user)
    }
}

#[async_trait]
impl<U> SignupService for AccountService<U>
where
    U: UserRepository,
{
    async fn sign_up(&self, details: SignupDetails) -> Result<User, Error> {
        let password = hash_password(details.password().to_owned()).await?;
        let SignupDetails {
            first_name,
            last_name,
            display_name,
            email,
            username,
            ..
        } = details;
        let user = User::new(UserDraft {
            id: UserId::random(),
            username,
            first_name,
            last_name,
            display_name,
            email,
            created_at: self.clock.utc().trunc_subsecs(6),
        })
        .map_err(|err| Error::invalid_request(err.to_string()))?;
        let account = UserAccount { user, password };

        match self.users.insert(&account).await {
            Ok(()) => {
                info!(user_id = %account.user.id(), "account registered");
                Ok(account.user)
            }
            Err(UserPersistenceError::DuplicateUsername { .. }) => {
                Err(Error::invalid_request(USERNAME_TAKEN_MESSAGE)
                    .with_details(json!({ "field": "username" })))
            }
            Err(other) => Err(map_user_error(other)),
        }
    }
}

#[async_trait]
impl<U> UserProfileQuery for AccountService<U>
where
    U: UserRepository,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .map(|account| account.user)
            .ok_or_else(|| Error::unauthorized(NOT_LOGGED_IN))
    }
}
