//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use chrono::{TimeZone, Utc};

use crate::domain::ports::{
    MockCredentialsCommand, MockCredentialsQuery, MockLoginService, MockSignupService,
    MockUserProfileQuery,
};
use crate::domain::{DisplayName, EmailAddress, User, UserDraft, UserId, Username};

use super::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Port doubles for handler tests; unset expectations panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub credentials: MockCredentialsQuery,
    pub credentials_command: MockCredentialsCommand,
    pub login: MockLoginService,
    pub signup: MockSignupService,
    pub profile: MockUserProfileQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            credentials: Arc::new(self.credentials),
            credentials_command: Arc::new(self.credentials_command),
            login: Arc::new(self.login),
            signup: Arc::new(self.signup),
            profile: Arc::new(self.profile),
        })
    }
}

/// A valid user with the given id and fixed profile values.
pub fn sample_user(id: UserId) -> User {
    User::new(UserDraft {
        id,
        username: Username::new("username").expect("username"),
        first_name: "Full".to_owned(),
        last_name: "Name".to_owned(),
        display_name: DisplayName::new("Full Name").expect("display name"),
        email: EmailAddress::new("test@test.com").expect("email"),
        created_at: Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    })
    .expect("valid user")
}
