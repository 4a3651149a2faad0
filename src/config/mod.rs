//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BEYOND_WHISPERS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use beyond_whispers::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Using model {}", config.ai.model);
//! ```

mod ai;
mod error;
mod logging;
mod storage;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads; `validate`
/// then reports what is still missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Completion provider configuration (Gemini or mock)
    #[serde(default)]
    pub ai: AiConfig,

    /// Profile storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BEYOND_WHISPERS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BEYOND_WHISPERS__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    /// - `BEYOND_WHISPERS__STORAGE__PROFILE_PATH=/tmp/p.yaml` -> `storage.profile_path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BEYOND_WHISPERS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "BEYOND_WHISPERS__AI__GEMINI_API_KEY",
        "BEYOND_WHISPERS__AI__PROVIDER",
        "BEYOND_WHISPERS__AI__MODEL",
        "BEYOND_WHISPERS__AI__TIMEOUT_SECS",
        "BEYOND_WHISPERS__STORAGE__PROFILE_PATH",
        "BEYOND_WHISPERS__LOGGING__FILTER",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.ai.provider, AiProvider::Gemini);
        assert_eq!(config.ai.timeout_secs, 60);
        assert_eq!(config.storage.profile_path, PathBuf::from("data/profile.yaml"));
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("BEYOND_WHISPERS__AI__GEMINI_API_KEY", "AIza-test");
        env::set_var("BEYOND_WHISPERS__AI__MODEL", "gemini-pro");
        env::set_var("BEYOND_WHISPERS__AI__TIMEOUT_SECS", "30");
        env::set_var("BEYOND_WHISPERS__STORAGE__PROFILE_PATH", "/tmp/bw/profile.yaml");
        env::set_var("BEYOND_WHISPERS__LOGGING__FILTER", "debug");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.gemini_api_key.as_deref(), Some("AIza-test"));
        assert_eq!(config.ai.model, "gemini-pro");
        assert_eq!(config.ai.timeout_secs, 30);
        assert_eq!(
            config.storage.profile_path,
            PathBuf::from("/tmp/bw/profile.yaml")
        );
        assert_eq!(config.logging.filter, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mock_provider_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("BEYOND_WHISPERS__AI__PROVIDER", "mock");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.provider, AiProvider::Mock);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_key_for_gemini() {
        let config = AppConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("GEMINI_API_KEY"))
        ));
    }
}
