//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters translate them into
//! HTTP status codes and response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::validation::ValidationError;
use super::yard::{TransitionError, YardError};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with current state (full yard, occupied
    /// capacity, motorcycle already assigned).
    Conflict,
    /// An unexpected error occurred inside the domain or a collaborator.
    InternalError,
}

/// Domain error payload carried from the failure site to the adapter.
///
/// # Examples
/// ```
/// use motoyard::domain::{DomainError, ErrorCode};
///
/// let err = DomainError::not_found("motorcycle not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DomainError {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

impl DomainError {
    /// Create an error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Supplementary structured details for clients.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let details = err.details();
        Self::invalid_request(err.to_string()).with_details(details)
    }
}

impl From<TransitionError> for DomainError {
    fn from(err: TransitionError) -> Self {
        Self::conflict(err.to_string())
    }
}

impl From<YardError> for DomainError {
    fn from(err: YardError) -> Self {
        match err {
            YardError::Validation(e) => e.into(),
            YardError::Transition(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn details_are_attached_and_readable() {
        let err = DomainError::invalid_request("bad").with_details(json!({ "field": "plate" }));
        assert_eq!(err.details(), Some(&json!({ "field": "plate" })));
        assert_eq!(err.to_string(), "bad");
    }

    #[rstest]
    fn validation_errors_become_invalid_request() {
        let err: DomainError = ValidationError::EmptyField { field: "model" }.into();
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert!(err.message().contains("model"));
    }

    #[rstest]
    fn transition_errors_become_conflicts() {
        let err: DomainError = TransitionError::YardFull { capacity: 2 }.into();
        assert_eq!(err.code(), ErrorCode::Conflict);
    }
}
