//! Brand analysis: a website URL to the validated brand summary.
//!
//! Extraction failure is recoverable here, not terminal: when the site
//! cannot be fetched, stage 1 runs against a minimal text built from the
//! URL and the user-supplied description instead.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::generation::BrandSummary;
use crate::ports::TextExtractor;

use super::orchestrator::GenerationError;
use super::pipeline::GenerationPipeline;

/// A brand to analyse: its website plus an optional description from the
/// brand owner.
#[derive(Debug, Clone)]
pub struct AnalyseBrandCommand {
    pub url: String,
    pub description: Option<String>,
}

/// Turns a brand URL into the stage 1 brand summary.
pub struct AnalyseBrandHandler {
    extractor: Arc<dyn TextExtractor>,
    pipeline: GenerationPipeline,
}

impl AnalyseBrandHandler {
    pub fn new(extractor: Arc<dyn TextExtractor>, pipeline: GenerationPipeline) -> Self {
        Self {
            extractor,
            pipeline,
        }
    }

    pub async fn handle(
        &self,
        command: AnalyseBrandCommand,
    ) -> Result<BrandSummary, GenerationError> {
        let (website_text, description) = match self.extractor.extract(&command.url).await {
            Ok(content) => {
                info!(url = %command.url, chars = content.full_text.len(), "website text extracted");
                (content.full_text, command.description)
            }
            Err(err) => {
                warn!(url = %command.url, error = %err, "website fetch failed, using description fallback");
                (
                    fallback_text(&command.url, command.description.as_deref()),
                    None,
                )
            }
        };

        self.pipeline
            .brand_summary(&website_text, description.as_deref())
            .await
    }
}

/// Minimal stage 1 input when the website cannot be fetched. The
/// description is folded in here rather than passed separately, so the
/// prompt sees it exactly once.
fn fallback_text(url: &str, description: Option<&str>) -> String {
    match description {
        Some(text) => format!("Brand URL: {url}\n\nUser description: {text}"),
        None => format!("Brand URL: {url}"),
    }
}
