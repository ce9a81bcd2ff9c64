//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use moodmeal_core::ResponsePolicy;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: Level,
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub recommendation_model: String,
    pub recipe_model: String,
    pub mock_latency: Duration,
    pub response_policy: ResponsePolicy,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Language Model Settings ---
        let openai_api_key = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty());
        let openai_base_url = lookup("OPENAI_BASE_URL");
        let recommendation_model =
            lookup("RECOMMENDATION_MODEL").unwrap_or_else(|| "gpt-4".to_string());
        let recipe_model = lookup("RECIPE_MODEL").unwrap_or_else(|| "gpt-4".to_string());

        // --- Mock Backend and Store Settings ---
        let latency_str = lookup("MOCK_LATENCY_MS").unwrap_or_else(|| "500".to_string());
        let mock_latency = latency_str
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidValue("MOCK_LATENCY_MS".to_string(), e.to_string()))?;

        let policy_str = lookup("RESPONSE_POLICY").unwrap_or_else(|| "latest-issued".to_string());
        let response_policy = match policy_str.to_lowercase().as_str() {
            "latest-issued" => ResponsePolicy::LatestIssuedWins,
            "last-fulfilled" => ResponsePolicy::LastFulfilledWins,
            other => {
                return Err(ConfigError::InvalidValue(
                    "RESPONSE_POLICY".to_string(),
                    format!("'{}' is not one of latest-issued, last-fulfilled", other),
                ))
            }
        };

        Ok(Self {
            log_level,
            openai_api_key,
            openai_base_url,
            recommendation_model,
            recipe_model,
            mock_latency,
            response_policy,
        })
    }

    /// The API key, for callers that cannot run without the language model.
    pub fn require_openai_api_key(&self) -> Result<&str, ConfigError> {
        self.openai_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVar("OPENAI_API_KEY".to_string()))
    }
}
