//! HTTP implementation of the text extractor port.
//!
//! Fetches a page and reduces its HTML to plain text: scripts, styles and
//! chrome are removed, meta information and headings are pulled out, and
//! the compiled text is capped at the configured bound with a truncation
//! marker.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;

use crate::config::ScrapeConfig;
use crate::ports::{ExtractedContent, ScrapeError, TextExtractor};

static STRIP_BLOCKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<(script|style|nav|footer|header|noscript|iframe|svg)[^>]*>.*?</(script|style|nav|footer|header|noscript|iframe|svg)>",
    )
    .expect("static regex")
});
static COMMENTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("static regex"));
static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("static regex"));
static META_DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<meta[^>]+name=["']description["'][^>]*content=["']([^"']*)["']"#)
        .expect("static regex")
});
static OG_DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<meta[^>]+property=["']og:description["'][^>]*content=["']([^"']*)["']"#)
        .expect("static regex")
});
static OG_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<meta[^>]+property=["']og:title["'][^>]*content=["']([^"']*)["']"#)
        .expect("static regex")
});
static HEADINGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h[1-3][^>]*>(.*?)</h[1-3]>").expect("static regex"));
static BODY_CHUNKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(?:p|li|td|blockquote)[^>]*>(.*?)</(?:p|li|td|blockquote)>")
        .expect("static regex")
});
static TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("static regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Reqwest-backed text extractor.
pub struct HttpTextExtractor {
    client: Client,
    config: ScrapeConfig,
}

impl HttpTextExtractor {
    /// Creates an extractor with the given configuration.
    pub fn new(config: ScrapeConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl TextExtractor for HttpTextExtractor {
    async fn extract(&self, url: &str) -> Result<ExtractedContent, ScrapeError> {
        let url = normalise_url(url)?;

        let response = self
            .client
            .get(&url)
            .header("User-Agent", &self.config.user_agent)
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScrapeError::Timeout {
                        timeout_secs: self.config.timeout_secs as u32,
                    }
                } else {
                    ScrapeError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Http {
                status: status.as_u16(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        Ok(reduce_html(&html, self.config.max_chars))
    }
}

/// Prefixes `https://` when no scheme is present.
fn normalise_url(url: &str) -> Result<String, ScrapeError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ScrapeError::InvalidUrl("empty url".to_string()));
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("https://{trimmed}"))
    }
}

/// Reduces raw HTML to the extracted-content shape.
fn reduce_html(html: &str, max_chars: usize) -> ExtractedContent {
    let stripped = COMMENTS.replace_all(html, " ");
    let stripped = STRIP_BLOCKS.replace_all(&stripped, " ");

    let title = TITLE
        .captures(&stripped)
        .map(|c| text_of(&c[1]))
        .filter(|t| !t.is_empty())
        .or_else(|| OG_TITLE.captures(&stripped).map(|c| text_of(&c[1])))
        .unwrap_or_default();

    let description = META_DESCRIPTION
        .captures(&stripped)
        .map(|c| text_of(&c[1]))
        .filter(|d| !d.is_empty())
        .or_else(|| OG_DESCRIPTION.captures(&stripped).map(|c| text_of(&c[1])))
        .unwrap_or_default();

    let headings: Vec<String> = HEADINGS
        .captures_iter(&stripped)
        .map(|c| text_of(&c[1]))
        .filter(|h| !h.is_empty() && h.len() < 200)
        .take(20)
        .collect();

    let body_parts: Vec<String> = BODY_CHUNKS
        .captures_iter(&stripped)
        .map(|c| text_of(&c[1]))
        .filter(|t| t.len() > 20 && t.len() < 2000)
        .collect();
    let body_text = body_parts.join("\n\n");

    let mut parts = Vec::new();
    if !title.is_empty() {
        parts.push(format!("Title: {title}"));
    }
    if !description.is_empty() {
        parts.push(format!("Description: {description}"));
    }
    if !headings.is_empty() {
        parts.push(format!("Headings:\n{}", headings.join("\n")));
    }
    if !body_text.is_empty() {
        parts.push(format!("Content:\n{body_text}"));
    }

    let mut full_text = parts.join("\n\n");
    if full_text.chars().count() > max_chars {
        full_text = full_text.chars().take(max_chars).collect();
        full_text.push_str("\n\n[Content truncated]");
    }

    ExtractedContent {
        title,
        description,
        headings,
        body_text,
        full_text,
    }
}

/// Strips any remaining tags and collapses whitespace.
fn text_of(fragment: &str) -> String {
    let no_tags = TAGS.replace_all(fragment, " ");
    WHITESPACE.replace_all(&no_tags, " ").trim().to_string()
}
