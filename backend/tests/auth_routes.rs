//! End-to-end tests for sign-up, sign-in, sign-out and the profile route.

#[path = "support/http.rs"]
mod http_support;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use credentials_backend::test_support::{SESSION_COOKIE, TestApp, session_cookie};
use http_support::{PASSWORD, init_app, send, sign_in, sign_up, signup_body};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn harness() -> TestApp {
    TestApp::new()
}

#[rstest]
#[actix_web::test]
async fn signup_returns_public_profile(harness: TestApp) {
    let app = init_app(&harness).await;

    let (user, _) = sign_up(&app, "username").await;

    assert!(user["_id"].is_string());
    assert_eq!(user["username"], "username");
    assert_eq!(user["firstName"], "Full");
    assert_eq!(user["lastName"], "Name");
    assert_eq!(user["displayName"], "Full Name");
    assert_eq!(user["email"], "test@test.com");
    assert_eq!(user["provider"], "local");
    assert!(user["created"].is_string());
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());
}

#[rstest]
#[actix_web::test]
async fn duplicate_username_is_rejected(harness: TestApp) {
    let app = init_app(&harness).await;
    sign_up(&app, "username").await;

    let (status, body) = send(
        &app,
        TestRequest::post()
            .uri("/auth/signup")
            .set_json(signup_body("username")),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already exists");
}

#[rstest]
#[case::short_password("password", json!("short"))]
#[case::bad_email("email", json!("not-an-email"))]
#[case::blank_last_name("lastName", json!("  "))]
#[actix_web::test]
async fn signup_validates_fields(harness: TestApp, #[case] field: &str, #[case] value: Value) {
    let app = init_app(&harness).await;
    let mut body = signup_body("username");
    body[field] = value;

    let (status, error) = send(
        &app,
        TestRequest::post().uri("/auth/signup").set_json(body),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_request");
    assert_eq!(error["details"]["field"], field);
}

#[rstest]
#[case::wrong_password("username", "wrong-password")]
#[case::unknown_user("ghost", PASSWORD)]
#[actix_web::test]
async fn bad_credentials_are_unauthorised(
    harness: TestApp,
    #[case] username: &str,
    #[case] password: &str,
) {
    let app = init_app(&harness).await;
    sign_up(&app, "username").await;

    let res = sign_in(&app, username, password).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&res).is_none());
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Unknown user or invalid password");
}

#[rstest]
#[actix_web::test]
async fn signin_opens_session_for_profile(harness: TestApp) {
    let app = init_app(&harness).await;
    let (registered, _) = sign_up(&app, "username").await;

    let res = sign_in(&app, "username", PASSWORD).await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res).expect("session cookie");

    let (status, me) = send(&app, TestRequest::get().uri("/users/me"), Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["_id"], registered["_id"]);
}

#[rstest]
#[actix_web::test]
async fn profile_requires_session(harness: TestApp) {
    let app = init_app(&harness).await;

    let (status, body) = send(&app, TestRequest::get().uri("/users/me"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "User is not logged in");
}

#[rstest]
#[actix_web::test]
async fn forged_cookie_counts_as_anonymous(harness: TestApp) {
    let app = init_app(&harness).await;
    let forged = Cookie::new(SESSION_COOKIE, "user_id=3fa85f64-5717-4562-b3fc-2c963f66afa6");

    let (status, _) = send(&app, TestRequest::get().uri("/users/me"), Some(&forged)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn signout_clears_the_cookie(harness: TestApp) {
    let app = init_app(&harness).await;
    let (_, cookie) = sign_up(&app, "username").await;

    let res = test::call_service(
        &app,
        TestRequest::get()
            .uri("/auth/signout")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let cleared = session_cookie(&res).expect("removal cookie");
    assert!(cleared.value().is_empty());
}

#[rstest]
#[actix_web::test]
async fn blank_signin_fields_are_bad_requests(harness: TestApp) {
    let app = init_app(&harness).await;

    let res = sign_in(&app, "  ", PASSWORD).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "username");
}

#[rstest]
#[actix_web::test]
async fn error_bodies_echo_trace_header(harness: TestApp) {
    let app = init_app(&harness).await;

    let res = test::call_service(
        &app,
        TestRequest::get().uri("/users/me").to_request(),
    )
    .await;

    let header = res
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace header");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["traceId"], header);
}
