//! Completion Client Port - Interface for the remote text-generation service.
//!
//! The core only needs one capability from the model provider: send a fully
//! built request, get back raw text or a classified failure. Wire formats,
//! authentication and endpoints belong to the adapters.
//!
//! # Contract
//!
//! - Exactly one outbound call per `send`, no caching or deduplication.
//! - No automatic retry. Whether to resend or rebuild the prompt is the
//!   caller's decision.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoClient;
//!
//! #[async_trait]
//! impl CompletionClient for EchoClient {
//!     async fn send(&self, request: CompletionRequest) -> CompletionResult {
//!         Ok(request.user_content)
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("echo", "none")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::RequestId;
use crate::domain::prompt::{RequestKind, SamplingProfile};

/// Port for the remote completion capability.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends one request and returns the raw generated text.
    async fn send(&self, request: CompletionRequest) -> CompletionResult;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Raw text on success, a classified failure otherwise.
pub type CompletionResult = Result<String, CompletionFailure>;

/// A fully built request. Immutable, built fresh per call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Correlates log lines for this call.
    pub id: RequestId,
    pub kind: RequestKind,
    /// Persona, bracket policy and (for strict kinds) the JSON instruction.
    pub system_context: String,
    /// Task body.
    pub user_content: String,
    pub strict_json: bool,
    pub sampling: SamplingProfile,
}

impl CompletionRequest {
    /// Creates a request whose JSON mode and sampling follow `kind`.
    pub fn new(
        kind: RequestKind,
        system_context: impl Into<String>,
        user_content: impl Into<String>,
    ) -> Self {
        Self {
            id: RequestId::new(),
            kind,
            system_context: system_context.into(),
            user_content: user_content.into(),
            strict_json: kind.strict_json(),
            sampling: kind.sampling(),
        }
    }
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini", "mock").
    pub name: String,
    /// Model identifier (e.g., "gemini-1.5-flash-latest").
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Classified transport and API failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionFailure {
    /// HTTP 429 from the provider.
    #[error("rate limited: {message}")]
    RateLimited { message: String },

    /// The provider refused the prompt or the output on content-policy grounds.
    #[error("blocked by safety settings: {message}")]
    SafetyBlocked { message: String },

    /// Any other non-2xx status.
    #[error("server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// 2xx, but no usable candidate text in the payload.
    #[error("no usable candidate in response: {reason}")]
    EmptyCandidate { reason: String },

    /// The request could not complete (connect failure, timeout, bad body).
    #[error("network unavailable: {message}")]
    NetworkUnavailable { message: String },
}

impl CompletionFailure {
    /// Creates a rate limited failure.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Creates a safety block failure.
    pub fn safety_blocked(message: impl Into<String>) -> Self {
        Self::SafetyBlocked {
            message: message.into(),
        }
    }

    /// Creates a server error failure.
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }

    /// Creates an empty candidate failure.
    pub fn empty_candidate(reason: impl Into<String>) -> Self {
        Self::EmptyCandidate {
            reason: reason.into(),
        }
    }

    /// Creates a network failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkUnavailable {
            message: message.into(),
        }
    }

    /// Returns true if resending the same request unchanged may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            CompletionFailure::RateLimited { .. }
            | CompletionFailure::EmptyCandidate { .. }
            | CompletionFailure::NetworkUnavailable { .. } => true,
            CompletionFailure::ServerError { status, .. } => *status >= 500,
            CompletionFailure::SafetyBlocked { .. } => false,
        }
    }

    /// Short advice shown to the user next to the failure.
    pub fn suggestion(&self) -> &'static str {
        match self {
            CompletionFailure::RateLimited { .. } => {
                "You might be making too many requests. Please wait a bit and try again."
            }
            CompletionFailure::SafetyBlocked { .. } => {
                "The request was blocked due to safety settings. Please rephrase your query."
            }
            _ => "Please try again.",
        }
    }

    /// Short user-facing description of the failure kind.
    pub fn summary(&self) -> String {
        match self {
            CompletionFailure::RateLimited { .. } => "The assistant is busy right now.".to_string(),
            CompletionFailure::SafetyBlocked { .. } => {
                "The assistant could not answer that request.".to_string()
            }
            CompletionFailure::ServerError { status, .. } => {
                format!("The assistant service returned an error ({}).", status)
            }
            CompletionFailure::EmptyCandidate { .. } => {
                "The assistant did not return an answer.".to_string()
            }
            CompletionFailure::NetworkUnavailable { .. } => {
                "Could not connect to the AI assistant.".to_string()
            }
        }
    }
}
