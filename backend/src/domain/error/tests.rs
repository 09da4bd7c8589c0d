//! Tests for the domain error payload.

use super::*;
use crate::domain::validation::ErrorKind;
use crate::domain::value_objects::{Email, Name};
use crate::domain::validation::ValidationBuilder;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn invalid_request_constructor_sets_code() {
    let err = Error::invalid_request("bad");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert!(err.errors().is_empty());
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
#[case(ErrorCode::InvalidRequest, ResponseStatus::Error)]
#[case(ErrorCode::Unauthorized, ResponseStatus::Error)]
#[case(ErrorCode::Forbidden, ResponseStatus::Error)]
#[case(ErrorCode::NotFound, ResponseStatus::Error)]
#[case(ErrorCode::Conflict, ResponseStatus::Error)]
#[case(ErrorCode::ServiceUnavailable, ResponseStatus::Fail)]
#[case(ErrorCode::InternalError, ResponseStatus::Fail)]
fn codes_map_to_envelope_status(#[case] code: ErrorCode, #[case] expected: ResponseStatus) {
    assert_eq!(code.response_status(), expected);
}

#[rstest]
fn with_error_accumulates_keys() {
    let err = Error::not_found("Missing")
        .with_error("group_not_found", "Group not found")
        .with_error("user_not_found", "User not found");
    assert_eq!(err.errors().len(), 2);
    assert_eq!(err.errors()["user_not_found"], "User not found");
}

#[rstest]
fn from_validation_lists_kinds_per_field() {
    let violations = ValidationBuilder::new()
        .value("name", &Name::new(""))
        .value("email", &Email::new("broken"))
        .build();
    let err = Error::from_validation("Wrong data", &violations);
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        Value::Object(err.errors().clone()),
        json!({
            "email": [ErrorKind::Email.as_str()],
            "name": ["not_blank", "string_too_short"],
        })
    );
}

#[rstest]
fn serde_round_trip_preserves_errors() {
    let err = Error::forbidden("Not allowed").with_error("permissions", "Not allowed");
    let value = serde_json::to_value(&err).expect("error serialises");
    assert_eq!(
        value,
        json!({
            "code": "forbidden",
            "message": "Not allowed",
            "errors": { "permissions": "Not allowed" },
        })
    );
    let back: Error = serde_json::from_value(value).expect("error deserialises");
    assert_eq!(back, err);
}

#[rstest]
fn deserialise_rejects_blank_message() {
    let value = json!({ "code": "not_found", "message": " " });
    assert!(serde_json::from_value::<Error>(value).is_err());
}
