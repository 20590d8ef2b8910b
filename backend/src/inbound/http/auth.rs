//! Authentication handlers: sign-up, sign-in and sign-out.
//!
//! ```text
//! POST /auth/signup {"firstName":"Full","lastName":"Name","email":"test@test.com","username":"username","password":"password"}
//! POST /auth/signin {"username":"username","password":"password"}
//! GET  /auth/signout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, SignupDetails, SignupInput,
    SignupValidationError, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Sign-in request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl TryFrom<SigninRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: SigninRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Sign-up request body. `displayName` defaults to `"firstName lastName"`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
    pub email: String,
    pub username: String,
    pub password: String,
}

impl SignupRequest {
    fn validate(&self) -> Result<SignupDetails, SignupValidationError> {
        SignupDetails::try_from_input(&SignupInput {
            first_name: &self.first_name,
            last_name: &self.last_name,
            display_name: self.display_name.as_deref(),
            email: &self.email,
            username: &self.username,
            password: &self.password,
        })
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

fn map_signup_validation_error(err: SignupValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": err.field() }))
}

/// Register a local account and sign it in.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request or username taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signUp",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<User>> {
    let details = payload.validate().map_err(map_signup_validation_error)?;
    let user = state.signup.sign_up(details).await?;
    session.persist_user(user.id())?;
    Ok(web::Json(user))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/auth/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown user or invalid password", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
#[post("/auth/signin")]
pub async fn signin(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SigninRequest>,
) -> ApiResult<web::Json<User>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(user.id())?;
    info!(user_id = %user.id(), "user signed in");
    Ok(web::Json(user))
}

/// Drop the session, if any.
#[utoipa::path(
    get,
    path = "/auth/signout",
    responses((status = 200, description = "Signed out")),
    tags = ["auth"],
    operation_id = "signOut",
    security([])
)]
#[get("/auth/signout")]
pub async fn signout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().finish()
}
