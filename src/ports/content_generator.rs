//! Content Generator Port - interface to the LLM collaborator.
//!
//! The generation orchestrator drives this port with a prompt and, on retry
//! attempts, a short corrective conversation. Implementations translate to a
//! concrete provider API and return the model's free text, which may wrap
//! the requested JSON in commentary or markdown fencing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for AI content generation.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generates free text for the given conversation.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GeneratorError>;
}

/// A generation request: the conversation to send plus an output bound.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Conversation turns, in order. The first turn carries the stage
    /// prompt; retry attempts append corrective turns.
    pub messages: Vec<Message>,
    /// Maximum tokens the model may produce.
    pub max_tokens: u32,
}

impl GenerationRequest {
    /// Creates a single-turn request from a stage prompt.
    pub fn from_prompt(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
            max_tokens,
        }
    }

    /// Creates a retry request: the original prompt followed by a synthetic
    /// apology turn and a user turn stating the previous attempt's exact
    /// validation error.
    pub fn with_retry_context(
        prompt: impl Into<String>,
        last_error: &str,
        max_tokens: u32,
    ) -> Self {
        Self {
            messages: vec![
                Message::user(prompt),
                Message::assistant("I apologise for the error."),
                Message::user(format!(
                    "Your previous response had the following error: {last_error}. \
                     Please fix it and return valid JSON only."
                )),
            ],
            max_tokens,
        }
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Role of the message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Generator transport errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeneratorError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Provider is unavailable (server error).
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// The provider rejected the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The provider response could not be interpreted.
    #[error("provider response error: {0}")]
    Response(String),
}

impl GeneratorError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a response error.
    pub fn response(message: impl Into<String>) -> Self {
        Self::Response(message.into())
    }

    /// Returns true if retrying later could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GeneratorError::RateLimited { .. }
                | GeneratorError::Unavailable { .. }
                | GeneratorError::Network(_)
                | GeneratorError::Timeout { .. }
        )
    }
}
