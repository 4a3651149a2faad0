//! Errors surfaced by feature handlers.

use thiserror::Error;

use super::Control;
use crate::domain::contract::ContractViolation;
use crate::domain::dialogue::DialogueError;
use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::profile::{AgeBracket, Feature};
use crate::ports::{CompletionFailure, ProfileStoreError};

/// Everything a feature interaction can fail with.
///
/// No variant is fatal: after any of them the feature stays usable and the
/// user may retry. Only `ProfileRequired` sends the user back to the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("no profile has been set up")]
    ProfileRequired,

    #[error("{feature} is not available for {bracket}")]
    FeatureUnavailable { feature: Feature, bracket: AgeBracket },

    #[error("{control} already has a request in flight")]
    Busy { control: Control },

    #[error("no scenario has been generated yet")]
    ScenarioMissing,

    #[error(transparent)]
    Completion(#[from] CompletionFailure),

    #[error("response rejected: {0}")]
    Contract(#[from] ContractViolation),

    #[error(transparent)]
    Dialogue(#[from] DialogueError),

    #[error("profile storage failed: {0}")]
    Storage(String),
}

impl From<ProfileStoreError> for FeatureError {
    fn from(err: ProfileStoreError) -> Self {
        FeatureError::Storage(err.to_string())
    }
}

impl FeatureError {
    /// True if the user may simply try the same action again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FeatureError::Completion(_) | FeatureError::Contract(_) | FeatureError::Busy { .. }
        )
    }

    /// True if the caller must send the user back to the profile form.
    pub fn requires_profile(&self) -> bool {
        matches!(self, FeatureError::ProfileRequired)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            FeatureError::Validation(_) => ErrorCode::ValidationFailed,
            FeatureError::ProfileRequired => ErrorCode::ProfileRequired,
            FeatureError::FeatureUnavailable { .. } => ErrorCode::FeatureUnavailable,
            FeatureError::Busy { .. } => ErrorCode::RequestPending,
            FeatureError::ScenarioMissing => ErrorCode::InvalidStateTransition,
            FeatureError::Dialogue(_) => ErrorCode::InvalidStateTransition,
            FeatureError::Storage(_) => ErrorCode::StorageError,
            FeatureError::Completion(failure) => match failure {
                CompletionFailure::RateLimited { .. } => ErrorCode::RateLimited,
                CompletionFailure::SafetyBlocked { .. } => ErrorCode::SafetyBlocked,
                CompletionFailure::ServerError { .. } => ErrorCode::ServerError,
                CompletionFailure::EmptyCandidate { .. } => ErrorCode::EmptyCandidate,
                CompletionFailure::NetworkUnavailable { .. } => ErrorCode::NetworkUnavailable,
            },
            FeatureError::Contract(violation) => match violation {
                ContractViolation::EmptyResponse => ErrorCode::EmptyResponse,
                ContractViolation::NotAnObject { .. } => ErrorCode::NotAnObject,
                ContractViolation::MalformedJson { .. } => ErrorCode::MalformedJson,
                ContractViolation::ShapeMismatch { .. } => ErrorCode::ShapeMismatch,
            },
        }
    }

    /// Text shown to the user: what went wrong plus what to do next.
    pub fn user_message(&self) -> String {
        match self {
            FeatureError::Completion(failure) => {
                format!("{} {}", failure.summary(), failure.suggestion())
            }
            FeatureError::Contract(violation) => {
                format!("{} Please try again.", violation.summary())
            }
            FeatureError::Validation(err) => format!("Please check your input: {}.", err),
            FeatureError::ProfileRequired => {
                "Please fill in your profile to use this feature.".to_string()
            }
            FeatureError::FeatureUnavailable { feature, bracket } => {
                format!("{} is not available for the {} age group.", feature, bracket)
            }
            FeatureError::Busy { .. } => {
                "Please wait for the current request to finish.".to_string()
            }
            FeatureError::ScenarioMissing => {
                "Please generate a scenario before choosing an option.".to_string()
            }
            FeatureError::Dialogue(err) => format!("That step is not possible right now: {}.", err),
            FeatureError::Storage(_) => {
                "Your profile could not be saved or loaded. Please try again.".to_string()
            }
        }
    }
}
