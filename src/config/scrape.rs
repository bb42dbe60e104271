//! Website text extraction configuration.

use std::env;
use std::time::Duration;

use super::error::ConfigError;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_CHARS: usize = 16_000;
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; Quizsmith/1.0)";

/// Configuration for the website text extraction adapter.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Fetch timeout in seconds.
    pub timeout_secs: u64,
    /// Bound on the compiled text length; longer content is truncated with
    /// a marker.
    pub max_chars: usize,
    /// User-Agent header sent with fetches.
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_chars: DEFAULT_MAX_CHARS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScrapeConfig {
    /// Fetch timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reads the configuration from the environment, falling back to
    /// defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(value) = env::var("QUIZSMITH_SCRAPE_TIMEOUT_SECS") {
            config.timeout_secs = value
                .parse()
                .map_err(|_| ConfigError::invalid("QUIZSMITH_SCRAPE_TIMEOUT_SECS", "not a number"))?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bound_content_at_sixteen_thousand_chars() {
        let config = ScrapeConfig::default();
        assert_eq!(config.max_chars, 16_000);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }
}
