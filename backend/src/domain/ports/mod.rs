//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound store adapters;
//! driving ports are implemented by domain services and called by inbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_repository;
mod credentials_command;
mod credentials_query;
mod login_service;
mod signup_service;
mod user_profile_query;
mod user_repository;

#[cfg(test)]
pub use credential_repository::MockCredentialRepository;
pub use credential_repository::{CredentialRepository, CredentialRepositoryError};
#[cfg(test)]
pub use credentials_command::MockCredentialsCommand;
pub use credentials_command::CredentialsCommand;
#[cfg(test)]
pub use credentials_query::MockCredentialsQuery;
pub use credentials_query::CredentialsQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{INVALID_LOGIN_MESSAGE, LoginService};
#[cfg(test)]
pub use signup_service::MockSignupService;
pub use signup_service::{SignupService, USERNAME_TAKEN_MESSAGE};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
