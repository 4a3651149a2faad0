//! Gemini Client - Implementation of CompletionClient for Google's
//! `generateContent` API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-1.5-flash-latest")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let client = GeminiClient::new(config)?;
//! ```
//!
//! # Failure mapping
//!
//! - HTTP 429 → `RateLimited`
//! - error `details[].reason == "SAFETY"`, `promptFeedback.blockReason`, or a
//!   candidate finishing with `SAFETY` → `SafetyBlocked`
//! - any other non-2xx → `ServerError`
//! - 2xx without candidate text, or a 2xx body that is not a response → `EmptyCandidate`
//! - connect failures, timeouts, bodies cut off in transit → `NetworkUnavailable`
//!
//! The client never retries; one `send` is one HTTP call.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::contract::preview;
use crate::ports::{
    CompletionClient, CompletionFailure, CompletionRequest, CompletionResult, ProviderInfo,
};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-1.5-flash-latest").
    pub model: String,
    /// Base URL for the API, without a trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Creates a configuration from an already-wrapped key.
    pub fn from_secret(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            ..Self::new(String::new())
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API client.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    fn map_transport_error(&self, e: reqwest::Error) -> CompletionFailure {
        if e.is_timeout() {
            CompletionFailure::network(format!(
                "request timed out after {}s",
                self.config.timeout.as_secs()
            ))
        } else if e.is_connect() {
            CompletionFailure::network(format!("connection failed: {}", e))
        } else {
            CompletionFailure::network(e.to_string())
        }
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn send(&self, request: CompletionRequest) -> CompletionResult {
        let body = GenerateContentRequest::from_request(&request);
        debug!(
            request_id = %request.id,
            kind = %request.kind,
            model = %self.config.model,
            "Sending Gemini request"
        );

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            let failure = classify_error(status.as_u16(), &text);
            warn!(
                request_id = %request.id,
                status = status.as_u16(),
                error = %failure,
                "Gemini request failed"
            );
            return Err(failure);
        }

        let parsed: GenerateContentResponse = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(e) => {
                let failure =
                    CompletionFailure::empty_candidate(format!("unreadable response body: {}", e));
                warn!(request_id = %request.id, error = %failure, "Gemini returned no usable text");
                return Err(failure);
            }
        };

        let result = extract_text(parsed);
        match &result {
            Ok(text) => debug!(
                request_id = %request.id,
                chars = text.chars().count(),
                "Gemini response received"
            ),
            Err(failure) => warn!(request_id = %request.id, error = %failure, "Gemini returned no usable text"),
        }
        result
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", &self.config.model)
    }
}

/// Maps a non-2xx status and its body to a classified failure.
pub fn classify_error(status: u16, body: &str) -> CompletionFailure {
    let envelope: Option<ErrorEnvelope> = serde_json::from_str(body).ok();
    let message = envelope
        .as_ref()
        .and_then(|env| env.error.message.clone())
        .unwrap_or_else(|| preview(body.trim()));
    let safety = envelope
        .as_ref()
        .map(|env| {
            env.error
                .details
                .iter()
                .any(|d| d.reason.as_deref() == Some("SAFETY"))
        })
        .unwrap_or(false);

    if status == 429 {
        CompletionFailure::rate_limited(message)
    } else if safety {
        CompletionFailure::safety_blocked(message)
    } else {
        CompletionFailure::server_error(status, message)
    }
}

/// Pulls the generated text out of a successful response.
pub fn extract_text(response: GenerateContentResponse) -> CompletionResult {
    let block_reason = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.clone());

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(match block_reason {
            Some(reason) => CompletionFailure::safety_blocked(format!("prompt blocked: {}", reason)),
            None => CompletionFailure::empty_candidate("no candidates in response"),
        });
    };

    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(CompletionFailure::safety_blocked(
            "candidate stopped for safety reasons",
        ));
    }

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate
            .finish_reason
            .map(|r| format!("candidate has no text (finish reason {})", r))
            .unwrap_or_else(|| "candidate has no text".to_string());
        return Err(CompletionFailure::empty_candidate(reason));
    }
    Ok(text)
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn from_request(request: &CompletionRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.user_content.clone()),
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(request.system_context.clone()),
                }],
            },
            generation_config: GenerationConfig {
                temperature: request.sampling.temperature,
                top_k: request.sampling.top_k,
                top_p: request.sampling.top_p,
                max_output_tokens: request.sampling.max_output_tokens,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

/// Body of a 2xx `generateContent` response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: Option<String>,
}
