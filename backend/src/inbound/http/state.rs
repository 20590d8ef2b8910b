//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! tests can swap in doubles without any I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    CredentialRepository, CredentialsCommand, CredentialsQuery, LoginService, SignupService,
    UserProfileQuery, UserRepository,
};
use crate::domain::{AccountService, CredentialService};

/// Port implementations needed by the HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub credentials: Arc<dyn CredentialsQuery>,
    pub credentials_command: Arc<dyn CredentialsCommand>,
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupService>,
    pub profile: Arc<dyn UserProfileQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub credentials: Arc<dyn CredentialsQuery>,
    pub credentials_command: Arc<dyn CredentialsCommand>,
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupService>,
    pub profile: Arc<dyn UserProfileQuery>,
}

impl HttpState {
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            credentials,
            credentials_command,
            login,
            signup,
            profile,
        } = ports;
        Self {
            credentials,
            credentials_command,
            login,
            signup,
            profile,
        }
    }
}

impl HttpStatePorts {
    /// Wire the domain services over a credential store and a user store.
    pub fn for_stores<C, U>(credentials: Arc<C>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self
    where
        C: CredentialRepository + 'static,
        U: UserRepository + 'static,
    {
        let records = Arc::new(CredentialService::new(credentials, users.clone(), clock.clone()));
        let accounts = Arc::new(AccountService::new(users, clock));
        Self {
            credentials: records.clone(),
            credentials_command: records,
            login: accounts.clone(),
            signup: accounts.clone(),
            profile: accounts,
        }
    }
}
