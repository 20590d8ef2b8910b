//! Authentication primitives: sign-in credentials and sign-up details.
//!
//! Inbound adapters build these from raw request bodies; services only ever
//! see validated values.

use std::fmt;

use zeroize::Zeroizing;

use super::{DisplayName, EmailAddress, UserValidationError, Username};

/// Minimum accepted password length at sign-up.
pub const PASSWORD_MIN_LEN: usize = 7;

/// Domain error returned when sign-in payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use credentials_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" username ", "password").unwrap();
/// assert_eq!(creds.username(), "username");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Sign-up validation failures, each tied to the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupValidationError {
    /// A profile field failed its value-object rules.
    Field {
        field: &'static str,
        error: UserValidationError,
    },
    /// The password is shorter than [`PASSWORD_MIN_LEN`].
    PasswordTooShort { min: usize },
}

impl SignupValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Field { field, .. } => *field,
            Self::PasswordTooShort { .. } => "password",
        }
    }
}

impl fmt::Display for SignupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { error, .. } => fmt::Display::fmt(error, f),
            Self::PasswordTooShort { .. } => write!(f, "Password should be longer"),
        }
    }
}

impl std::error::Error for SignupValidationError {}

/// Raw sign-up input prior to validation.
#[derive(Debug, Clone, Default)]
pub struct SignupInput<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub display_name: Option<&'a str>,
    pub email: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

/// Validated sign-up details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    pub first_name: String,
    pub last_name: String,
    pub display_name: DisplayName,
    pub email: EmailAddress,
    pub username: Username,
    password: Zeroizing<String>,
}

impl SignupDetails {
    /// Validate raw sign-up input.
    ///
    /// The display name defaults to `"first last"` when omitted or blank.
    pub fn try_from_input(input: &SignupInput<'_>) -> Result<Self, SignupValidationError> {
        let first_name = input.first_name.trim();
        if first_name.is_empty() {
            return Err(field_error("firstName", UserValidationError::EmptyFirstName));
        }
        let last_name = input.last_name.trim();
        if last_name.is_empty() {
            return Err(field_error("lastName", UserValidationError::EmptyLastName));
        }
        let email = EmailAddress::new(input.email).map_err(|err| field_error("email", err))?;
        let username = Username::new(input.username).map_err(|err| field_error("username", err))?;
        if input.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(SignupValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        let display_name = match input.display_name.filter(|name| !name.trim().is_empty()) {
            Some(name) => DisplayName::new(name),
            None => DisplayName::new(format!("{first_name} {last_name}")),
        }
        .map_err(|err| field_error("displayName", err))?;

        Ok(Self {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            display_name,
            email,
            username,
            password: Zeroizing::new(input.password.to_owned()),
        })
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

fn field_error(field: &'static str, error: UserValidationError) -> SignupValidationError {
    SignupValidationError::Field { field, error }
}
