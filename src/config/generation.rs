//! Generation orchestrator configuration.

use secrecy::Secret;
use std::env;
use std::time::Duration;

use super::error::ConfigError;

const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_BASE_SECS: u64 = 3;

/// Configuration for the content generation collaborator and the
/// orchestrator's retry policy.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Credential for the generation collaborator.
    pub api_key: Secret<String>,
    /// Model identifier.
    pub model: String,
    /// Base URL for the provider API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Bounded attempt count per stage.
    pub max_retries: u32,
    /// Exponential backoff base: the delay before attempt n+1 after a
    /// failed attempt n (0-based) is `backoff_base_secs ^ n` seconds.
    pub backoff_base_secs: u64,
}

impl GenerationConfig {
    /// Creates a configuration with the given API key and defaults for
    /// everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base_secs: DEFAULT_BACKOFF_BASE_SECS,
        }
    }

    /// Sets the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the maximum attempt count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff base.
    pub fn with_backoff_base_secs(mut self, secs: u64) -> Self {
        self.backoff_base_secs = secs;
        self
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reads the configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key =
            env::var("QUIZSMITH_API_KEY").map_err(|_| ConfigError::MissingRequired("QUIZSMITH_API_KEY"))?;
        if api_key.is_empty() {
            return Err(ConfigError::MissingRequired("QUIZSMITH_API_KEY"));
        }

        let mut config = Self::new(api_key);
        if let Ok(model) = env::var("QUIZSMITH_MODEL") {
            config.model = model;
        }
        if let Ok(url) = env::var("QUIZSMITH_BASE_URL") {
            config.base_url = url;
        }
        if let Ok(value) = env::var("QUIZSMITH_MAX_RETRIES") {
            config.max_retries = value
                .parse()
                .map_err(|_| ConfigError::invalid("QUIZSMITH_MAX_RETRIES", "not a number"))?;
        }
        if let Ok(value) = env::var("QUIZSMITH_BACKOFF_BASE_SECS") {
            config.backoff_base_secs = value
                .parse()
                .map_err(|_| ConfigError::invalid("QUIZSMITH_BACKOFF_BASE_SECS", "not a number"))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_retries == 0 {
            return Err(ConfigError::invalid(
                "QUIZSMITH_MAX_RETRIES",
                "must be at least 1",
            ));
        }
        if self.backoff_base_secs == 0 {
            return Err(ConfigError::invalid(
                "QUIZSMITH_BACKOFF_BASE_SECS",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_retry_policy() {
        let config = GenerationConfig::new("key");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.backoff_base_secs, 3);
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn builder_overrides_apply() {
        let config = GenerationConfig::new("key")
            .with_model("claude-3-haiku")
            .with_base_url("http://localhost:8080")
            .with_max_retries(5)
            .with_backoff_base_secs(2);
        assert_eq!(config.model, "claude-3-haiku");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.backoff_base_secs, 2);
    }

    #[test]
    fn zero_retries_fail_validation() {
        let config = GenerationConfig::new("key").with_max_retries(0);
        assert!(config.validate().is_err());
    }
}
