//! Anthropic implementation of the content generator port.
//!
//! Non-streaming Messages API only: each pipeline stage wants one complete
//! text body to run extraction and validation over, so streaming buys
//! nothing here.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;
use crate::ports::{ContentGenerator, GenerationRequest, GeneratorError, MessageRole};

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Anthropic Messages API generator.
pub struct AnthropicGenerator {
    config: GenerationConfig,
    client: Client,
}

impl AnthropicGenerator {
    /// Creates a new generator with the given configuration.
    pub fn new(config: GenerationConfig) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GeneratorError::network(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url)
    }

    /// Converts a port request to Anthropic's wire format.
    fn to_api_request(&self, request: &GenerationRequest) -> ApiRequest {
        let messages = request
            .messages
            .iter()
            .map(|m| ApiMessage {
                role: match m.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: m.content.clone(),
            })
            .collect();

        ApiRequest {
            model: self.config.model.clone(),
            max_tokens: request.max_tokens,
            messages,
        }
    }

    /// Maps a non-success status to a generator error.
    async fn handle_response_status(&self, response: Response) -> Result<Response, GeneratorError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(GeneratorError::AuthenticationFailed),
            429 => Err(GeneratorError::RateLimited {
                retry_after_secs: parse_retry_after(&error_body),
            }),
            400 => Err(GeneratorError::InvalidRequest(error_body)),
            500..=599 => Err(GeneratorError::unavailable(format!(
                "server error {status}: {error_body}"
            ))),
            _ => Err(GeneratorError::network(format!(
                "unexpected status {status}: {error_body}"
            ))),
        }
    }
}

#[async_trait]
impl ContentGenerator for AnthropicGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GeneratorError> {
        let api_request = self.to_api_request(&request);

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeneratorError::Timeout {
                        timeout_secs: self.config.timeout_secs as u32,
                    }
                } else if e.is_connect() {
                    GeneratorError::network(format!("connection failed: {e}"))
                } else {
                    GeneratorError::network(e.to_string())
                }
            })?;

        let response = self.handle_response_status(response).await?;

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::response(format!("malformed response body: {e}")))?;

        body.content
            .into_iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text)
            .ok_or_else(|| GeneratorError::response("no text content in AI response"))
    }
}

/// Parses retry timing from an Anthropic error message, defaulting to 60s.
fn parse_retry_after(error_body: &str) -> u32 {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
        if let Some(message) = parsed
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            if let Some(idx) = message.find("try again in ") {
                let rest = &message[idx + 13..];
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                if let Ok(secs) = digits.parse() {
                    return secs;
                }
            }
        }
    }
    60
}

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ApiMessage>,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ApiContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ApiContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Message;

    fn generator() -> AnthropicGenerator {
        AnthropicGenerator::new(GenerationConfig::new("test-key")).unwrap()
    }

    #[test]
    fn request_conversion_preserves_turn_order_and_roles() {
        let request = GenerationRequest {
            messages: vec![
                Message::user("the prompt"),
                Message::assistant("I apologise for the error."),
                Message::user("fix it"),
            ],
            max_tokens: 8192,
        };

        let api = generator().to_api_request(&request);
        assert_eq!(api.max_tokens, 8192);
        assert_eq!(api.messages.len(), 3);
        assert_eq!(api.messages[0].role, "user");
        assert_eq!(api.messages[1].role, "assistant");
        assert_eq!(api.messages[2].content, "fix it");
    }

    #[test]
    fn messages_url_joins_base() {
        let g = AnthropicGenerator::new(
            GenerationConfig::new("k").with_base_url("http://localhost:9999"),
        )
        .unwrap();
        assert_eq!(g.messages_url(), "http://localhost:9999/v1/messages");
    }

    #[test]
    fn retry_after_is_parsed_from_error_message() {
        let body = r#"{"error": {"message": "rate limited, try again in 12s"}}"#;
        assert_eq!(parse_retry_after(body), 12);
        assert_eq!(parse_retry_after("not json"), 60);
    }

    #[test]
    fn response_body_deserializes_text_blocks() {
        let json = r#"{"content": [{"type": "text", "text": "{\"a\":1}"}]}"#;
        let body: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.content[0].kind, "text");
        assert_eq!(body.content[0].text, "{\"a\":1}");
    }
}
