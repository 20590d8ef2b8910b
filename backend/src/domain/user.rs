//! User data model.
//!
//! Users own credentials and authenticate with a username and password. The
//! password digest never leaves [`UserAccount`]; [`User`] is the public shape
//! returned to clients and embedded (as [`UserSummary`]) in credentials.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;

use super::PasswordDigest;

/// Validation errors returned by the user value objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyUsername,
    UsernameTooLong { max: usize },
    UsernameInvalidCharacters,
    EmptyFirstName,
    EmptyLastName,
    EmptyDisplayName,
    DisplayNameTooLong { max: usize },
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "Please fill in a username"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, dots, dashes, or underscores",
            ),
            Self::EmptyFirstName => write!(f, "Please fill in your first name"),
            Self::EmptyLastName => write!(f, "Please fill in your last name"),
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::DisplayNameTooLong { max } => {
                write!(f, "display name must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "Please fill a valid email address"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 64;
/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 64;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &'static str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("pattern {pattern} failed to compile: {error}"))
    })
}

/// Unique login name, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !compiled(&USERNAME_RE, "^[A-Za-z0-9._-]+$").is_match(trimmed) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human readable name shown next to the user's credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact address in a loose `local@domain.tld` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if !compiled(&EMAIL_RE, r"^[^\s@]+@[^\s@]+\.[^\s@]+$").is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How the account authenticates. Only local password accounts exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[default]
    Local,
}

impl AuthProvider {
    /// Stable storage label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
        }
    }
}

/// Input bundle for [`User::new`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub id: UserId,
    pub username: Username,
    pub first_name: String,
    pub last_name: String,
    pub display_name: DisplayName,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
}

/// Application user as exposed to clients.
///
/// ## Invariants
/// - `first_name` and `last_name` are non-empty once trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(value_type = String, example = "username")]
    username: Username,
    #[schema(example = "Full")]
    first_name: String,
    #[schema(example = "Name")]
    last_name: String,
    #[schema(value_type = String, example = "Full Name")]
    display_name: DisplayName,
    #[schema(value_type = String, example = "test@test.com")]
    email: EmailAddress,
    provider: AuthProvider,
    #[serde(rename = "created")]
    #[schema(value_type = String, format = DateTime)]
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a user from validated parts.
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        let UserDraft {
            id,
            username,
            first_name,
            last_name,
            display_name,
            email,
            created_at,
        } = draft;
        let first_name = first_name.trim().to_owned();
        if first_name.is_empty() {
            return Err(UserValidationError::EmptyFirstName);
        }
        let last_name = last_name.trim().to_owned();
        if last_name.is_empty() {
            return Err(UserValidationError::EmptyLastName);
        }
        Ok(Self {
            id,
            username,
            first_name,
            last_name,
            display_name,
            email,
            provider: AuthProvider::Local,
            created_at,
        })
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn provider(&self) -> AuthProvider {
        self.provider
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reduced view embedded in credential payloads.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            display_name: self.display_name.clone(),
        }
    }
}

/// Owner reference populated into credential responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: UserId,
    #[schema(value_type = String, example = "Full Name")]
    pub display_name: DisplayName,
}

/// Stored account: the public user plus its password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub user: User,
    pub password: PasswordDigest,
}

#[cfg(test)]
mod tests;
