//! OpenAPI documentation for the REST API.
//!
//! [`ApiDoc`] collects the handler annotations from the inbound layer and the
//! domain schemas. Swagger UI serves it in debug builds, and
//! `cargo run --bin openapi-dump` writes it to stdout for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{AuthProvider, CredentialView, Error, ErrorCode, User, UserSummary};
use crate::inbound::http::auth::{SigninRequest, SignupRequest};
use crate::inbound::http::credentials::CredentialPayload;

/// Registers the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /auth/signin or /auth/signup.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Credentials backend API",
        description = "Session-authenticated CRUD over named credentials."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::signin,
        crate::inbound::http::auth::signout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::credentials::list_credentials,
        crate::inbound::http::credentials::get_credential,
        crate::inbound::http::credentials::create_credential,
        crate::inbound::http::credentials::update_credential,
        crate::inbound::http::credentials::delete_credential,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        UserSummary,
        AuthProvider,
        CredentialView,
        CredentialPayload,
        SigninRequest,
        SignupRequest,
        Error,
        ErrorCode
    )),
    tags(
        (name = "auth", description = "Sign-up, sign-in and sign-out"),
        (name = "users", description = "The signed-in user"),
        (name = "credentials", description = "Credential records"),
        (name = "health", description = "Probes for orchestrators")
    )
)]
pub struct ApiDoc;
