//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors raised while validating user-supplied values.
///
/// These are resolved at the input boundary and never reach the
/// completion client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be at least {min}, got {actual}")]
    BelowMinimum { field: String, min: i64, actual: i64 },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a below-minimum validation error.
    pub fn below_minimum(field: impl Into<String>, min: i64, actual: i64) -> Self {
        ValidationError::BelowMinimum {
            field: field.into(),
            min,
            actual,
        }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::BelowMinimum { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Stable error codes handed to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input
    ValidationFailed,
    ProfileRequired,
    FeatureUnavailable,
    RequestPending,
    InvalidStateTransition,

    // Completion transport
    RateLimited,
    SafetyBlocked,
    ServerError,
    EmptyCandidate,
    NetworkUnavailable,

    // Response contract
    EmptyResponse,
    NotAnObject,
    MalformedJson,
    ShapeMismatch,

    // Infrastructure
    StorageError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::ProfileRequired => "PROFILE_REQUIRED",
            ErrorCode::FeatureUnavailable => "FEATURE_UNAVAILABLE",
            ErrorCode::RequestPending => "REQUEST_PENDING",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::SafetyBlocked => "SAFETY_BLOCKED",
            ErrorCode::ServerError => "SERVER_ERROR",
            ErrorCode::EmptyCandidate => "EMPTY_CANDIDATE",
            ErrorCode::NetworkUnavailable => "NETWORK_UNAVAILABLE",
            ErrorCode::EmptyResponse => "EMPTY_RESPONSE",
            ErrorCode::NotAnObject => "NOT_AN_OBJECT",
            ErrorCode::MalformedJson => "MALFORMED_JSON",
            ErrorCode::ShapeMismatch => "SHAPE_MISMATCH",
            ErrorCode::StorageError => "STORAGE_ERROR",
        };
        write!(f, "{}", s)
    }
}
