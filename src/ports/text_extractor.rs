//! Text Extractor Port - website content extraction for stage 1 input.
//!
//! Failure here is recoverable: the pipeline caller can fall back to a
//! user-supplied brand description instead of website text.

use async_trait::async_trait;
use thiserror::Error;

/// Port for turning a URL into plain text suitable as generation input.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Fetches the URL and reduces its content to plain text.
    async fn extract(&self, url: &str) -> Result<ExtractedContent, ScrapeError>;
}

/// Plain-text content extracted from one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    pub title: String,
    pub description: String,
    pub headings: Vec<String>,
    pub body_text: String,
    /// Compiled text for the stage 1 prompt, truncated with a marker when
    /// it exceeds the configured bound (~16,000 characters).
    pub full_text: String,
}

/// Website extraction errors.
#[derive(Debug, Clone, Error)]
pub enum ScrapeError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("failed to fetch URL: {status}")]
    Http { status: u16 },

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}
