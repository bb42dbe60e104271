//! Generation orchestrator: drives one pipeline stage end to end.
//!
//! A stage attempt runs generate -> extract -> structural validation ->
//! business validation. Every failure mode is retry-eligible within the
//! same bounded budget: the failure's description is threaded into the next
//! attempt as corrective conversation context, and the loop gives up with
//! [`GenerationError::Exhausted`] once the budget is spent.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::GenerationConfig;
use crate::domain::generation::extract_json;
use crate::ports::{ContentGenerator, GenerationRequest, GeneratorError};

/// Terminal generation failure, surfaced once all attempts are spent.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    #[error("AI generation failed after {attempts} attempts. Last error: {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}

impl GenerationError {
    /// The last underlying error message.
    pub fn last_error(&self) -> &str {
        match self {
            GenerationError::Exhausted { last_error, .. } => last_error,
        }
    }
}

/// One attempt's failure, tagged by phase. All variants are retry-eligible;
/// only transport failures warrant backing off before the next attempt.
#[derive(Debug)]
enum AttemptFailure {
    Parse(String),
    Schema(String),
    BusinessRule(String),
    Transport(GeneratorError),
}

impl AttemptFailure {
    /// The description fed back into the next attempt's prompt.
    fn feedback(&self) -> String {
        match self {
            AttemptFailure::Parse(msg)
            | AttemptFailure::Schema(msg)
            | AttemptFailure::BusinessRule(msg) => msg.clone(),
            AttemptFailure::Transport(err) => err.to_string(),
        }
    }

    fn phase(&self) -> &'static str {
        match self {
            AttemptFailure::Parse(_) => "parse",
            AttemptFailure::Schema(_) => "schema",
            AttemptFailure::BusinessRule(_) => "business_rule",
            AttemptFailure::Transport(_) => "transport",
        }
    }

    fn wants_backoff(&self) -> bool {
        matches!(self, AttemptFailure::Transport(_))
    }
}

/// Runs single stages against the content generator with bounded,
/// feedback-directed retries.
pub struct StageRunner {
    generator: Arc<dyn ContentGenerator>,
    config: GenerationConfig,
}

impl StageRunner {
    /// Creates a runner over the given generator and configuration.
    pub fn new(generator: Arc<dyn ContentGenerator>, config: GenerationConfig) -> Self {
        Self { generator, config }
    }

    /// Access to the retry configuration.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Drives one stage to a validated value.
    ///
    /// `structural` checks shape and bounds and produces the typed
    /// artifact; `business`, when supplied, enforces cross-referential
    /// rules on the structurally valid value and returns a violation
    /// description to feed back, or `None` when satisfied.
    pub async fn run_stage<T>(
        &self,
        prompt: &str,
        structural: &dyn Fn(serde_json::Value) -> Result<T, String>,
        business: Option<&dyn Fn(&T) -> Option<String>>,
        max_tokens: u32,
    ) -> Result<T, GenerationError> {
        let mut last_failure: Option<AttemptFailure> = None;

        for attempt in 0..self.config.max_retries {
            let request = match &last_failure {
                Some(failure) => {
                    GenerationRequest::with_retry_context(prompt, &failure.feedback(), max_tokens)
                }
                None => GenerationRequest::from_prompt(prompt, max_tokens),
            };

            let failure = match self.attempt(request, structural, business).await {
                Ok(value) => {
                    debug!(attempt, "stage attempt succeeded");
                    return Ok(value);
                }
                Err(failure) => failure,
            };

            warn!(
                attempt,
                phase = failure.phase(),
                error = %failure.feedback(),
                "stage attempt failed"
            );

            let more_attempts_remain = attempt + 1 < self.config.max_retries;
            if failure.wants_backoff() && more_attempts_remain {
                let delay = self.config.backoff_base_secs.saturating_pow(attempt);
                debug!(delay_secs = delay, "backing off before next attempt");
                tokio::time::sleep(Duration::from_secs(delay)).await;
            }

            last_failure = Some(failure);
        }

        let last_error = last_failure
            .map(|f| f.feedback())
            .unwrap_or_else(|| "unknown error".to_string());

        Err(GenerationError::Exhausted {
            attempts: self.config.max_retries,
            last_error,
        })
    }

    /// One full attempt: generate, extract, validate.
    async fn attempt<T>(
        &self,
        request: GenerationRequest,
        structural: &dyn Fn(serde_json::Value) -> Result<T, String>,
        business: Option<&dyn Fn(&T) -> Option<String>>,
    ) -> Result<T, AttemptFailure> {
        let raw = self
            .generator
            .generate(request)
            .await
            .map_err(AttemptFailure::Transport)?;

        let value = extract_json(&raw).map_err(|e| AttemptFailure::Parse(e.to_string()))?;

        let parsed = structural(value).map_err(AttemptFailure::Schema)?;

        if let Some(check) = business {
            if let Some(violation) = check(&parsed) {
                return Err(AttemptFailure::BusinessRule(violation));
            }
        }

        Ok(parsed)
    }
}
