//! Shared in-process HTTP helpers for route tests.

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use credentials_backend::test_support::{TestApp, session_cookie};
use serde_json::{Value, json};

pub const PASSWORD: &str = "password";

/// Initialise the harness's app as a callable service.
pub async fn init_app(
    harness: &TestApp,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(harness.app()).await
}

pub fn signup_body(username: &str) -> Value {
    json!({
        "firstName": "Full",
        "lastName": "Name",
        "email": "test@test.com",
        "username": username,
        "password": PASSWORD,
    })
}

/// Register `username` and return the session cookie issued for it.
pub async fn sign_up<S>(app: &S, username: &str) -> (Value, Cookie<'static>)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        TestRequest::post()
            .uri("/auth/signup")
            .set_json(signup_body(username))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "sign-up for {username}");
    let cookie = session_cookie(&res).expect("sign-up sets a session cookie");
    (test::read_body_json(res).await, cookie)
}

pub async fn sign_in<S>(app: &S, username: &str, password: &str) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    test::call_service(
        app,
        TestRequest::post()
            .uri("/auth/signin")
            .set_json(json!({ "username": username, "password": password }))
            .to_request(),
    )
    .await
}

/// Send `req`, optionally with a session cookie, and decode the JSON body.
pub async fn send<S>(
    app: &S,
    req: TestRequest,
    cookie: Option<&Cookie<'static>>,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = match cookie {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    };
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON response body")
    };
    (status, value)
}
