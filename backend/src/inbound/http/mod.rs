//! HTTP inbound adapter exposing the REST endpoints.
//!
//! Handlers parse requests, resolve the session identity and delegate to the
//! driving ports held in [`state::HttpState`].

pub mod auth;
pub mod credentials;
pub mod error;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::{ApiResult, json_error_handler};

/// Register the API routes and the JSON body configuration.
///
/// Health probes are registered separately because they depend on
/// [`health::HealthState`] rather than the domain ports.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use credentials_backend::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(auth::signup)
        .service(auth::signin)
        .service(auth::signout)
        .service(users::current_user)
        .service(credentials::list_credentials)
        .service(credentials::get_credential)
        .service(credentials::create_credential)
        .service(credentials::update_credential)
        .service(credentials::delete_credential);
}
