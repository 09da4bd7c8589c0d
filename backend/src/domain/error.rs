//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses carrying the uniform response envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::response::ResponseStatus;
use crate::domain::validation::ValidationErrors;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with existing state.
    Conflict,
    /// A backing service is unavailable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

impl ErrorCode {
    /// Envelope status for this code: client faults are `error`, server
    /// faults are `fail`.
    pub const fn response_status(self) -> ResponseStatus {
        match self {
            Self::ServiceUnavailable | Self::InternalError => ResponseStatus::Fail,
            Self::InvalidRequest
            | Self::Unauthorized
            | Self::Forbidden
            | Self::NotFound
            | Self::Conflict => ResponseStatus::Error,
        }
    }
}

/// Domain error payload.
///
/// `errors` maps machine-readable keys to detail values, e.g.
/// `{"group_not_found": "Group not found"}` or, for validation failures,
/// `{"name": ["not_blank"]}`.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use basket::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Group not found").with_error("group_not_found", "missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert!(err.errors().contains_key("group_not_found"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    errors: Map<String, Value>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was empty or whitespace.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create a new error, panicking if validation fails.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            errors: Map::new(),
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Machine-readable error keys and their details.
    pub fn errors(&self) -> &Map<String, Value> {
        &self.errors
    }

    /// Attach a machine-readable error key.
    ///
    /// # Examples
    /// ```
    /// use basket::domain::Error;
    ///
    /// let err = Error::conflict("Name taken").with_error("group_name_repeated", "Name taken");
    /// assert_eq!(err.errors()["group_name_repeated"], "Name taken");
    /// ```
    pub fn with_error(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.errors.insert(key.into(), value.into());
        self
    }

    /// Build an [`ErrorCode::InvalidRequest`] error from field violations.
    pub fn from_validation(message: impl Into<String>, errors: &ValidationErrors) -> Self {
        errors
            .iter()
            .fold(Self::invalid_request(message), |error, (field, kinds)| {
                let kinds: Vec<Value> = kinds
                    .iter()
                    .map(|kind| Value::from(kind.as_str()))
                    .collect();
                error.with_error(field, kinds)
            })
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(default)]
    errors: Map<String, Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            errors: value.errors,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            message,
            errors,
        } = value;

        let mut error = Self::try_new(code, message)?;
        error.errors = errors;
        Ok(error)
    }
}

#[cfg(test)]
mod tests;
