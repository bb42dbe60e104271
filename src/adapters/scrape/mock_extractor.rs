//! Mock text extractor for testing.
//!
//! Scripted results are consumed in order; requested URLs are captured so
//! tests can verify what the caller asked for.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ports::{ExtractedContent, ScrapeError, TextExtractor};

/// A configurable mock extractor.
#[derive(Debug, Clone, Default)]
pub struct MockTextExtractor {
    replies: Arc<Mutex<VecDeque<Result<ExtractedContent, ScrapeError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockTextExtractor {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful extraction.
    pub fn with_content(self, content: ExtractedContent) -> Self {
        lock(&self.replies).push_back(Ok(content));
        self
    }

    /// Queues a successful extraction carrying only compiled text.
    pub fn with_text(self, full_text: impl Into<String>) -> Self {
        self.with_content(ExtractedContent {
            title: String::new(),
            description: String::new(),
            headings: Vec::new(),
            body_text: String::new(),
            full_text: full_text.into(),
        })
    }

    /// Queues a failed extraction.
    pub fn with_error(self, error: ScrapeError) -> Self {
        lock(&self.replies).push_back(Err(error));
        self
    }

    /// Returns the requested URLs, in call order.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait]
impl TextExtractor for MockTextExtractor {
    async fn extract(&self, url: &str) -> Result<ExtractedContent, ScrapeError> {
        lock(&self.calls).push(url.to_string());

        match lock(&self.replies).pop_front() {
            Some(result) => result,
            None => Err(ScrapeError::Network(
                "mock: no scripted result remaining".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn results_are_consumed_in_order() {
        let extractor = MockTextExtractor::new()
            .with_text("first page")
            .with_error(ScrapeError::Http { status: 404 });

        let content = extractor.extract("https://a.example").await.unwrap();
        assert_eq!(content.full_text, "first page");
        assert!(extractor.extract("https://b.example").await.is_err());
        assert_eq!(extractor.calls(), vec!["https://a.example", "https://b.example"]);
    }

    #[tokio::test]
    async fn exhausted_script_reports_network_error() {
        let extractor = MockTextExtractor::new();
        let err = extractor.extract("https://a.example").await.unwrap_err();
        assert!(matches!(err, ScrapeError::Network(_)));
    }
}
