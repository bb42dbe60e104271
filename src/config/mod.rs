//! Application configuration.
//!
//! Configuration is an explicit struct handed to the orchestrator at
//! construction time; nothing inside the pipeline reads the process
//! environment. Environment loading (with `.env` support via `dotenvy`)
//! lives only at this edge.

mod error;
mod generation;
mod scrape;

pub use error::ConfigError;
pub use generation::GenerationConfig;
pub use scrape::ScrapeConfig;

/// Root configuration for the quiz generation core.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Generation orchestrator configuration (API key, retry policy).
    pub generation: GenerationConfig,

    /// Website text extraction configuration.
    pub scrape: ScrapeConfig,
}

impl AppConfig {
    /// Loads configuration from environment variables, reading a `.env`
    /// file first when present.
    ///
    /// Recognised variables:
    /// - `QUIZSMITH_API_KEY` (required) - generation collaborator credential
    /// - `QUIZSMITH_MODEL`, `QUIZSMITH_BASE_URL`
    /// - `QUIZSMITH_MAX_RETRIES`, `QUIZSMITH_BACKOFF_BASE_SECS`
    /// - `QUIZSMITH_SCRAPE_TIMEOUT_SECS`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let generation = GenerationConfig::from_env()?;
        let scrape = ScrapeConfig::from_env()?;

        Ok(Self { generation, scrape })
    }
}
