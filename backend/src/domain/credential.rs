//! Credential aggregate: a named record optionally owned by a user.
//!
//! "Credential" here is a user-managed resource, not key material.

use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{UserId, UserSummary};

/// Message surfaced whenever a credential name is missing.
pub const CREDENTIAL_NAME_REQUIRED: &str = "Please fill Credential name";

/// Validation errors for credential values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialValidationError {
    /// The name was missing or blank once trimmed.
    #[error("Please fill Credential name")]
    EmptyName,
    /// The identifier was not a UUID.
    #[error("credential id must be a valid UUID")]
    InvalidId,
}

/// Stable credential identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CredentialId(Uuid);

impl CredentialId {
    /// Parse an identifier from a path segment.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CredentialValidationError> {
        Uuid::parse_str(raw.as_ref())
            .map(Self)
            .map_err(|_| CredentialValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for CredentialId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// Non-empty credential name, trimmed of surrounding whitespace.
///
/// # Examples
/// ```
/// use credentials_backend::domain::CredentialName;
///
/// let name = CredentialName::new("  Credential Name ").unwrap();
/// assert_eq!(name.as_ref(), "Credential Name");
/// assert!(CredentialName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CredentialName(String);

impl CredentialName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CredentialValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CredentialValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CredentialName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A stored credential record.
///
/// ## Invariants
/// - `id` and `created_at` never change after creation.
/// - `owner` is fixed at creation; `None` means nobody owns the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    id: CredentialId,
    name: CredentialName,
    owner: Option<UserId>,
    created_at: DateTime<Utc>,
}

impl Credential {
    /// Create a new record stamped with a fresh id.
    ///
    /// `created_at` is cut to microseconds, the precision the store keeps.
    pub fn create(name: CredentialName, owner: Option<UserId>, created_at: DateTime<Utc>) -> Self {
        Self::from_parts(
            CredentialId::random(),
            name,
            owner,
            created_at.trunc_subsecs(6),
        )
    }

    /// Rebuild a record from stored parts.
    pub fn from_parts(
        id: CredentialId,
        name: CredentialName,
        owner: Option<UserId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            owner,
            created_at,
        }
    }

    pub fn id(&self) -> CredentialId {
        self.id
    }

    pub fn name(&self) -> &CredentialName {
        &self.name
    }

    pub fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the name, keeping everything else.
    pub fn rename(&mut self, name: CredentialName) {
        self.name = name;
    }

    /// Whether `actor` may update or delete this record.
    ///
    /// Owned records are reserved to their owner; owner-less records are open
    /// to any signed-in user.
    pub fn is_modifiable_by(&self, actor: &UserId) -> bool {
        self.owner.as_ref().is_none_or(|owner| owner == actor)
    }
}

/// Client-facing credential with its owner populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialView {
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "0f8fad5b-d9cb-469f-a165-70867728950e")]
    pub id: CredentialId,
    #[schema(value_type = String, example = "Credential Name")]
    pub name: CredentialName,
    #[serde(rename = "created")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    /// Owner summary, or `null` when the record has no (known) owner.
    pub user: Option<UserSummary>,
}

impl CredentialView {
    /// Pair a record with its resolved owner.
    pub fn new(credential: Credential, owner: Option<UserSummary>) -> Self {
        let Credential {
            id,
            name,
            created_at,
            ..
        } = credential;
        Self {
            id,
            name,
            created_at,
            user: owner,
        }
    }
}
