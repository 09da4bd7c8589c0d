//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

async fn body_of(error: &Error) -> (StatusCode, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("envelope JSON deserialisation succeeds");
    (status, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("repeated"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[actix_web::test]
async fn client_errors_render_error_envelope() {
    let error =
        Error::not_found("Group not found").with_error("group_not_found", "Group not found");
    let (status, body) = body_of(&error).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "status": "error",
            "message": "Group not found",
            "data": [],
            "errors": { "group_not_found": "Group not found" },
        })
    );
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let error = Error::internal("connection string leaked").with_error("sql", "secret");
    let (status, body) = body_of(&error).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(body["errors"], json!({}));
}

#[actix_web::test]
async fn unavailable_errors_keep_their_message() {
    let (status, body) = body_of(&Error::service_unavailable("Service unavailable")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Service unavailable");
}
