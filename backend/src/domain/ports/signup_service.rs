//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, SignupDetails, User};

/// Message returned when the requested username is taken.
pub const USERNAME_TAKEN_MESSAGE: &str = "Username already exists";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Register a local account and return its public profile.
    async fn sign_up(&self, details: SignupDetails) -> Result<User, Error>;
}
