//! Completion provider configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Completion provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which client to wire up
    #[serde(default)]
    pub provider: AiProvider,

    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Model name, e.g. `gemini-1.5-flash-latest`
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL, without the `/models/...` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Completion provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Gemini,
    /// Canned replies, no network. For demos and offline runs.
    Mock,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a Gemini key is configured
    pub fn has_gemini_key(&self) -> bool {
        self.gemini_api_key
            .as_ref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Builds the client configuration. The key moves into a `Secret`.
    pub fn gemini(&self) -> Result<GeminiConfig, ValidationError> {
        let key = self
            .gemini_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ValidationError::MissingRequired("GEMINI_API_KEY"))?;
        Ok(GeminiConfig::from_secret(Secret::new(key))
            .with_model(self.model.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout()))
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.provider == AiProvider::Gemini && !self.has_gemini_key() {
            return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            gemini_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    60
}
