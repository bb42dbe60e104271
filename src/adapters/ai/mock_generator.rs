//! Mock content generator for testing.
//!
//! Scripted replies are consumed in order; requests are captured so tests
//! can verify the retry conversation the orchestrator builds.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ports::{ContentGenerator, GenerationRequest, GeneratorError};

/// A configurable mock generator.
#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

/// One scripted reply.
#[derive(Debug, Clone)]
enum ScriptedReply {
    Text(String),
    Error(GeneratorError),
}

impl MockGenerator {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful text reply.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        lock(&self.replies).push_back(ScriptedReply::Text(text.into()));
        self
    }

    /// Queues a JSON reply.
    pub fn with_json_reply(self, value: &serde_json::Value) -> Self {
        let text = value.to_string();
        self.with_reply(text)
    }

    /// Queues an error reply.
    pub fn with_error(self, error: GeneratorError) -> Self {
        lock(&self.replies).push_back(ScriptedReply::Error(error));
        self
    }

    /// Returns the captured requests, in call order.
    pub fn calls(&self) -> Vec<GenerationRequest> {
        lock(&self.calls).clone()
    }

    /// Returns how many times `generate` was invoked.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait]
impl ContentGenerator for MockGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GeneratorError> {
        lock(&self.calls).push(request);

        match lock(&self.replies).pop_front() {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Error(error)) => Err(error),
            None => Err(GeneratorError::unavailable("mock: no scripted reply remaining")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::GenerationRequest;

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let generator = MockGenerator::new()
            .with_reply("first")
            .with_error(GeneratorError::network("boom"))
            .with_reply("second");

        let request = GenerationRequest::from_prompt("p", 16);
        assert_eq!(generator.generate(request.clone()).await.unwrap(), "first");
        assert!(generator.generate(request.clone()).await.is_err());
        assert_eq!(generator.generate(request.clone()).await.unwrap(), "second");
        assert_eq!(generator.call_count(), 3);
    }

    #[tokio::test]
    async fn exhausted_script_reports_unavailable() {
        let generator = MockGenerator::new();
        let err = generator
            .generate(GenerationRequest::from_prompt("p", 16))
            .await
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn calls_capture_the_full_conversation() {
        let generator = MockGenerator::new().with_reply("ok");
        let request = GenerationRequest::with_retry_context("p", "bad json", 16);
        generator.generate(request).await.unwrap();

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].messages.len(), 3);
        assert!(calls[0].messages[2].content.contains("bad json"));
    }
}
