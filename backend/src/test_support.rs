//! In-memory app harness for integration tests.
//!
//! Compiled for unit tests and behind the `test-support` feature, which the
//! crate's own dev-dependency enables for `tests/`.

use std::sync::Arc;

use actix_session::config::CookieContentSecurity;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::{Clock, DefaultClock};

use crate::Trace;
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryCredentialRepository, InMemoryUserRepository};

/// Name of the session cookie set by the app.
pub const SESSION_COOKIE: &str = "session";

/// Isolated stores plus the state wired over them.
///
/// Build one per test; nothing is shared between instances.
pub struct TestApp {
    pub credentials: Arc<InMemoryCredentialRepository>,
    pub users: Arc<InMemoryUserRepository>,
    state: web::Data<HttpState>,
    key: Key,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let credentials = Arc::new(InMemoryCredentialRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let ports = HttpStatePorts::for_stores(credentials.clone(), users.clone(), clock);
        Self {
            credentials,
            users,
            state: web::Data::new(HttpState::new(ports)),
            key: Key::generate(),
        }
    }

    /// The API as served in production, minus TLS-only cookie flags.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE.to_owned())
            .cookie_secure(false)
            .cookie_content_security(CookieContentSecurity::Private)
            .build();
        App::new()
            .app_data(self.state.clone())
            .wrap(session)
            .wrap(Trace)
            .configure(configure_api)
    }
}

/// The session cookie set on `res`, if any.
pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}
