//! Tests for the HTTP error envelope.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_json(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = error.error_response();
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body()).await.expect("body bytes");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, header, value)
}

#[rstest]
#[case(Error::invalid_request("x"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("x"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("x"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("x"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("x"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("x"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("x"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_follows_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted() {
    let error = Error::internal("connection string postgres://secret")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "sql": "select 1" }));
    let (status, header, body) = body_json(&error).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({ "code": "internal_error", "message": REDACTED_MESSAGE, "traceId": TRACE_ID })
    );
}

#[rstest]
#[actix_web::test]
async fn validation_details_reach_the_client() {
    let fields = json!({ "fields": { "seats": ["Not a valid choice."] } });
    let error = Error::invalid_request("invalid form").with_details(fields.clone());
    let (status, header, body) = body_json(&error).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(header.is_none());
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"], fields);
}

#[rstest]
fn actix_errors_become_internal() {
    let actix_error = actix_web::error::ErrorBadGateway("upstream");
    let error = Error::from(actix_error);
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), REDACTED_MESSAGE);
}
