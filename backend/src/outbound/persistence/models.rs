//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them into
//! domain types at the boundary.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Credential, CredentialId, CredentialName, DisplayName, EmailAddress, PasswordDigest, User,
    UserAccount, UserDraft, UserId, Username,
};

use super::schema::{credentials, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub email: String,
    #[expect(dead_code, reason = "only local accounts exist")]
    pub provider: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<(User, String), String> {
        let user = User::new(UserDraft {
            id: UserId::from_uuid(self.id),
            username: Username::new(&self.username).map_err(|err| err.to_string())?,
            first_name: self.first_name,
            last_name: self.last_name,
            display_name: DisplayName::new(&self.display_name).map_err(|err| err.to_string())?,
            email: EmailAddress::new(&self.email).map_err(|err| err.to_string())?,
            created_at: self.created_at,
        })
        .map_err(|err| err.to_string())?;
        Ok((user, self.password_hash))
    }

    /// Rebuild the stored account, digest included.
    pub fn into_account(self) -> Result<UserAccount, String> {
        let id = self.id;
        let (user, hash) = self.into_user()?;
        let password = PasswordDigest::from_phc(hash)
            .map_err(|err| format!("user {id}: {err}"))?;
        Ok(UserAccount { user, password })
    }

    /// Public profile only; the digest is dropped unparsed.
    pub fn into_public(self) -> Result<User, String> {
        self.into_user().map(|(user, _)| user)
    }
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub display_name: &'a str,
    pub email: &'a str,
    pub provider: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a UserAccount> for NewUserRow<'a> {
    fn from(account: &'a UserAccount) -> Self {
        let user = &account.user;
        Self {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            first_name: user.first_name(),
            last_name: user.last_name(),
            display_name: user.display_name().as_ref(),
            email: user.email().as_ref(),
            provider: user.provider().as_str(),
            password_hash: account.password.as_phc(),
            created_at: user.created_at(),
        }
    }
}

/// Row struct for reading from the credentials table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = credentials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialRow {
    pub id: Uuid,
    pub name: String,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CredentialRow> for Credential {
    type Error = String;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        let name = CredentialName::new(&row.name)
            .map_err(|err| format!("credential {}: {err}", row.id))?;
        Ok(Self::from_parts(
            CredentialId::from_uuid(row.id),
            name,
            row.user_id.map(UserId::from_uuid),
            row.created_at,
        ))
    }
}

/// Insertable struct for creating credential records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = credentials)]
pub(crate) struct NewCredentialRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Credential> for NewCredentialRow<'a> {
    fn from(credential: &'a Credential) -> Self {
        Self {
            id: *credential.id().as_uuid(),
            name: credential.name().as_ref(),
            user_id: credential.owner().map(|owner| *owner.as_uuid()),
            created_at: credential.created_at(),
        }
    }
}

/// Changeset applied by credential updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = credentials)]
pub(crate) struct CredentialUpdate<'a> {
    pub name: &'a str,
}
