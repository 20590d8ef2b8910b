//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("clash"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn body_of(error: &Error) -> (Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("error JSON deserialises");
    (header, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(trace_id: String) {
    let error = Error::internal("database password is hunter2")
        .with_trace_id(trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let (header, payload) = body_of(&error).await;

    assert_eq!(header.as_deref(), Some(trace_id.as_str()));
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), REDACTED_MESSAGE);
    assert_eq!(payload.trace_id(), Some(trace_id.as_str()));
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(trace_id: String) {
    let error = Error::forbidden("User is not authorized")
        .with_trace_id(trace_id)
        .with_details(json!({"field": "name"}));

    let (_, payload) = body_of(&error).await;

    assert_eq!(payload, error);
}

#[rstest]
#[actix_web::test]
async fn missing_trace_id_omits_header() {
    let (header, payload) = body_of(&Error::not_found("Credential not found")).await;
    assert!(header.is_none());
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
fn actix_errors_are_promoted_to_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), REDACTED_MESSAGE);
}

#[rstest]
fn json_errors_become_invalid_requests() {
    let req = actix_web::test::TestRequest::default().to_http_request();
    let err = json_error_handler(JsonPayloadError::ContentType, &req);

    assert_eq!(err.as_response_error().status_code(), StatusCode::BAD_REQUEST);
}
