//! Credential CRUD handlers.
//!
//! ```text
//! GET    /credentials
//! GET    /credentials/{id}
//! POST   /credentials       {"name":"Credential Name"}
//! PUT    /credentials/{id}  {"name":"Renamed"}
//! DELETE /credentials/{id}
//! ```
//!
//! Reads are public. Mutations check the session before looking at the
//! payload or the record.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    CREDENTIAL_NOT_FOUND, CredentialId, CredentialName, CredentialValidationError, CredentialView,
    Error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body for create and update requests.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CredentialPayload {
    #[serde(default)]
    #[schema(example = "Credential Name")]
    pub name: String,
}

fn parse_name(payload: Option<web::Json<CredentialPayload>>) -> Result<CredentialName, Error> {
    let raw = payload.map(|body| body.into_inner().name).unwrap_or_default();
    CredentialName::new(raw).map_err(map_validation_error)
}

// Unparseable ids cannot name a stored record.
fn parse_id(raw: &str) -> Result<CredentialId, Error> {
    CredentialId::new(raw).map_err(|_| Error::not_found(CREDENTIAL_NOT_FOUND))
}

fn map_validation_error(err: CredentialValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": "name" }))
}

/// List every credential, newest first.
#[utoipa::path(
    get,
    path = "/credentials",
    responses(
        (status = 200, description = "All credentials", body = [CredentialView]),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["credentials"],
    operation_id = "listCredentials",
    security([])
)]
#[get("/credentials")]
pub async fn list_credentials(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CredentialView>>> {
    let views = state.credentials.list_credentials().await?;
    Ok(web::Json(views))
}

/// Fetch one credential.
#[utoipa::path(
    get,
    path = "/credentials/{id}",
    params(("id" = String, Path, description = "Credential id")),
    responses(
        (status = 200, description = "Credential", body = CredentialView),
        (status = 404, description = "Credential not found", body = Error)
    ),
    tags = ["credentials"],
    operation_id = "getCredential",
    security([])
)]
#[get("/credentials/{id}")]
pub async fn get_credential(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CredentialView>> {
    let id = parse_id(&path)?;
    let view = state.credentials.get_credential(&id).await?;
    Ok(web::Json(view))
}

/// Create a credential owned by the signed-in user.
#[utoipa::path(
    post,
    path = "/credentials",
    request_body = CredentialPayload,
    responses(
        (status = 200, description = "Created credential", body = CredentialView),
        (status = 400, description = "Please fill Credential name", body = Error),
        (status = 401, description = "User is not logged in", body = Error)
    ),
    tags = ["credentials"],
    operation_id = "createCredential",
    security(("SessionCookie" = []))
)]
#[post("/credentials")]
pub async fn create_credential(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Option<web::Json<CredentialPayload>>,
) -> ApiResult<web::Json<CredentialView>> {
    let actor = session.require_user_id()?;
    let name = parse_name(payload)?;
    let view = state
        .credentials_command
        .create_credential(&actor, name)
        .await?;
    Ok(web::Json(view))
}

/// Rename a credential.
#[utoipa::path(
    put,
    path = "/credentials/{id}",
    params(("id" = String, Path, description = "Credential id")),
    request_body = CredentialPayload,
    responses(
        (status = 200, description = "Updated credential", body = CredentialView),
        (status = 400, description = "Please fill Credential name", body = Error),
        (status = 401, description = "User is not logged in", body = Error),
        (status = 403, description = "User is not authorized", body = Error),
        (status = 404, description = "Credential not found", body = Error)
    ),
    tags = ["credentials"],
    operation_id = "updateCredential",
    security(("SessionCookie" = []))
)]
#[put("/credentials/{id}")]
pub async fn update_credential(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Option<web::Json<CredentialPayload>>,
) -> ApiResult<web::Json<CredentialView>> {
    let actor = session.require_user_id()?;
    let id = parse_id(&path)?;
    let name = parse_name(payload)?;
    let view = state
        .credentials_command
        .update_credential(&actor, &id, name)
        .await?;
    Ok(web::Json(view))
}

/// Delete a credential and return what was removed.
#[utoipa::path(
    delete,
    path = "/credentials/{id}",
    params(("id" = String, Path, description = "Credential id")),
    responses(
        (status = 200, description = "Deleted credential", body = CredentialView),
        (status = 401, description = "User is not logged in", body = Error),
        (status = 403, description = "User is not authorized", body = Error),
        (status = 404, description = "Credential not found", body = Error)
    ),
    tags = ["credentials"],
    operation_id = "deleteCredential",
    security(("SessionCookie" = []))
)]
#[delete("/credentials/{id}")]
pub async fn delete_credential(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CredentialView>> {
    let actor = session.require_user_id()?;
    let id = parse_id(&path)?;
    let view = state
        .credentials_command
        .delete_credential(&actor, &id)
        .await?;
    Ok(web::Json(view))
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;
