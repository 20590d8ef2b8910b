//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! adapters, plus the services implementing the driving ports. Types keep
//! their invariants in their constructors and document their serde shape in
//! Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `User`, `UserAccount`, `UserSummary`: accounts and their public views.
//! - `Credential`, `CredentialView`: the managed resource.
//! - `CredentialService`, `AccountService`: driving port implementations.

pub mod account_service;
pub mod auth;
pub mod credential;
pub mod credentials_service;
pub mod error;
pub mod password;
pub mod ports;
mod trace_id;
pub mod user;

pub use self::account_service::{AccountService, NOT_LOGGED_IN};
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN_LEN, SignupDetails, SignupInput,
    SignupValidationError,
};
pub use self::credential::{
    CREDENTIAL_NAME_REQUIRED, Credential, CredentialId, CredentialName, CredentialValidationError,
    CredentialView,
};
pub use self::credentials_service::{CREDENTIAL_NOT_FOUND, CredentialService, NOT_AUTHORIZED};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::password::{PasswordDigest, PasswordError};
pub use self::trace_id::TraceId;
pub use self::user::{
    AuthProvider, DisplayName, EmailAddress, User, UserAccount, UserDraft, UserId, UserSummary,
    UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use credentials_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
