//! Uniform response envelope.
//!
//! Every response body has the shape
//! `{ "status": "ok" | "error" | "fail", "message", "data", "errors" }`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::Error;

/// Outcome reported by the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The request succeeded.
    Ok,
    /// The client sent a request that cannot be served.
    Error,
    /// The server failed to serve a valid request.
    Fail,
}

/// Response envelope carrying `data` of type `T`.
///
/// # Examples
/// ```
/// use basket::domain::{Error, ResponseDto, ResponseStatus};
///
/// let ok = ResponseDto::ok("Created", vec![1, 2]);
/// assert_eq!(ok.status(), ResponseStatus::Ok);
///
/// let failed = ResponseDto::from_error(&Error::not_found("Missing"));
/// assert_eq!(failed.status(), ResponseStatus::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDto<T = Value> {
    status: ResponseStatus,
    message: String,
    data: T,
    #[serde(default)]
    errors: Map<String, Value>,
}

impl<T> ResponseDto<T> {
    /// Successful envelope.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: message.into(),
            data,
            errors: Map::new(),
        }
    }

    pub fn status(&self) -> ResponseStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn errors(&self) -> &Map<String, Value> {
        &self.errors
    }

    /// Consume the envelope, returning its payload.
    pub fn into_data(self) -> T {
        self.data
    }
}

impl ResponseDto<Value> {
    /// Failure envelope for `error`; `data` is an empty list.
    pub fn from_error(error: &Error) -> Self {
        Self {
            status: error.code().response_status(),
            message: error.message().to_owned(),
            data: Value::Array(Vec::new()),
            errors: error.errors().clone(),
        }
    }
}

impl From<&Error> for ResponseDto<Value> {
    fn from(value: &Error) -> Self {
        Self::from_error(value)
    }
}
