//! Pipeline sequencer: the four fixed generation stages.
//!
//! Strictly sequential; each stage depends on all prior outputs. Concept
//! selection between stages 2 and 3 is a human decision and happens outside
//! the pipeline. An exhausted stage aborts the chain: no partial quiz is
//! ever assembled from a failed run.

use std::sync::Arc;
use tracing::info;

use crate::config::GenerationConfig;
use crate::domain::generation::{
    prompts, validate, BrandSummary, GeneratedQuiz, GeneratedResultMappings, QuizConcept,
};
use crate::ports::ContentGenerator;

use super::orchestrator::{GenerationError, StageRunner};

/// Default output bound for stages 1-3.
const DEFAULT_MAX_TOKENS: u32 = 4096;
/// Stage 4 emits the full matrix and needs more room.
const MAPPINGS_MAX_TOKENS: u32 = 8192;

/// The four-stage quiz generation pipeline.
pub struct GenerationPipeline {
    runner: StageRunner,
}

impl GenerationPipeline {
    /// Creates a pipeline over the given generator and configuration.
    pub fn new(generator: Arc<dyn ContentGenerator>, config: GenerationConfig) -> Self {
        Self {
            runner: StageRunner::new(generator, config),
        }
    }

    /// Stage 1: website text (and an optional user description) to a brand
    /// summary.
    pub async fn brand_summary(
        &self,
        website_text: &str,
        user_description: Option<&str>,
    ) -> Result<BrandSummary, GenerationError> {
        info!("generating brand summary");
        let prompt = prompts::brand_summary_prompt(website_text, user_description);
        self.runner
            .run_stage(&prompt, &validate::brand_summary, None, DEFAULT_MAX_TOKENS)
            .await
    }

    /// Stage 2: brand summary to 3-5 candidate quiz concepts. The caller
    /// picks one before stage 3.
    pub async fn quiz_concepts(
        &self,
        brand_summary: &BrandSummary,
    ) -> Result<Vec<QuizConcept>, GenerationError> {
        info!(brand = %brand_summary.brand_name, "generating quiz concepts");
        let prompt = prompts::quiz_concepts_prompt(brand_summary);
        self.runner
            .run_stage(&prompt, &validate::quiz_concepts, None, DEFAULT_MAX_TOKENS)
            .await
    }

    /// Stage 3: brand summary plus the chosen concept to a full quiz
    /// structure.
    pub async fn quiz_structure(
        &self,
        brand_summary: &BrandSummary,
        concept: &QuizConcept,
    ) -> Result<GeneratedQuiz, GenerationError> {
        info!(concept = %concept.title, "generating quiz structure");
        let prompt = prompts::quiz_structure_prompt(brand_summary, concept);
        self.runner
            .run_stage(
                &prompt,
                &validate::generated_quiz,
                Some(&validate::quiz_structure_rules),
                DEFAULT_MAX_TOKENS,
            )
            .await
    }

    /// Stage 4: result types and the scoring matrix, cross-checked against
    /// the exact index space of the stage 3 output.
    pub async fn result_mappings(
        &self,
        quiz: &GeneratedQuiz,
        result_type_names: &[String],
        brand_summary: &BrandSummary,
    ) -> Result<GeneratedResultMappings, GenerationError> {
        info!(
            questions = quiz.questions.len(),
            result_types = result_type_names.len(),
            "generating result mappings"
        );
        let prompt = prompts::result_mappings_prompt(quiz, result_type_names, brand_summary);
        let business = |mappings: &GeneratedResultMappings| {
            validate::result_mappings_rules(mappings, quiz)
        };
        self.runner
            .run_stage(
                &prompt,
                &validate::result_mappings,
                Some(&business),
                MAPPINGS_MAX_TOKENS,
            )
            .await
    }
}
