//! Persistence assembly: index-addressed artifacts to identifier-addressed
//! records.
//!
//! The pipeline's final artifacts reference questions, options and result
//! types by array position. Assembly inserts the records in dependency
//! order, collects the generated identifiers, and rewrites every scoring
//! entry against them. Exactly one persisted row per mapping entry; an
//! entry whose indices cannot be resolved aborts the whole assembly rather
//! than being skipped.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use tracing::info;

use crate::domain::foundation::{AnswerOptionId, DomainError};
use crate::domain::generation::{GeneratedQuiz, GeneratedResultMappings, QuizConcept};
use crate::domain::quiz::{
    slugify, AnswerOption, NewAnswerOption, NewQuestion, NewQuiz, NewResultType, Question, Quiz,
    QuizStatus, ResultType, ScoringMapping, DEFAULT_COLOURS,
};
use crate::ports::QuizRepository;

const SLUG_SUFFIX_LEN: usize = 4;
const SLUG_ATTEMPTS: u32 = 5;

/// The fully persisted quiz, returned so callers can address every record
/// by identifier.
#[derive(Debug, Clone)]
pub struct AssembledQuiz {
    pub quiz: Quiz,
    pub questions: Vec<Question>,
    /// Options grouped per question, in question order.
    pub options: Vec<Vec<AnswerOption>>,
    pub result_types: Vec<ResultType>,
    pub mapping_count: usize,
}

/// Persists pipeline output as a draft quiz aggregate.
pub struct QuizAssembler {
    repository: Arc<dyn QuizRepository>,
}

impl QuizAssembler {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    /// Persists the generated quiz, its result types and the scoring
    /// matrix as one aggregate in `Draft` status.
    pub async fn assemble(
        &self,
        concept: &QuizConcept,
        quiz: &GeneratedQuiz,
        mappings: &GeneratedResultMappings,
    ) -> Result<AssembledQuiz, DomainError> {
        let slug = self.unique_slug(&quiz.title).await?;

        let persisted_quiz = self
            .repository
            .insert_quiz(NewQuiz {
                slug,
                title: quiz.title.clone(),
                description: quiz.intro_text.clone(),
                status: QuizStatus::Draft,
                concept: Some(concept.clone()),
            })
            .await?;

        let mut questions = Vec::with_capacity(quiz.questions.len());
        let mut options: Vec<Vec<AnswerOption>> = Vec::with_capacity(quiz.questions.len());
        let mut option_ids: HashMap<(usize, usize), AnswerOptionId> = HashMap::new();

        for (q_idx, generated) in quiz.questions.iter().enumerate() {
            let question = self
                .repository
                .insert_question(NewQuestion {
                    quiz_id: persisted_quiz.id,
                    sort_order: q_idx as u32,
                    text: generated.text.clone(),
                    question_type: generated.question_type,
                    insight: generated.insight.clone(),
                })
                .await?;

            let mut question_options = Vec::with_capacity(generated.options.len());
            for (o_idx, generated_option) in generated.options.iter().enumerate() {
                let option = self
                    .repository
                    .insert_answer_option(NewAnswerOption {
                        question_id: question.id,
                        sort_order: o_idx as u32,
                        text: generated_option.text.clone(),
                    })
                    .await?;
                option_ids.insert((q_idx, o_idx), option.id);
                question_options.push(option);
            }

            questions.push(question);
            options.push(question_options);
        }

        let mut result_types = Vec::with_capacity(mappings.result_types.len());
        for (rt_idx, generated) in mappings.result_types.iter().enumerate() {
            let result_type = self
                .repository
                .insert_result_type(NewResultType {
                    quiz_id: persisted_quiz.id,
                    sort_order: rt_idx as u32,
                    name: generated.name.clone(),
                    description: generated.description.clone(),
                    recommendation_detail: generated.recommendation_detail.clone(),
                    colour: Some(DEFAULT_COLOURS[rt_idx % DEFAULT_COLOURS.len()].to_string()),
                })
                .await?;
            result_types.push(result_type);
        }

        for entry in &mappings.mappings {
            let answer_option_id = option_ids
                .get(&(entry.question_index, entry.option_index))
                .copied()
                .ok_or_else(|| {
                    DomainError::internal(format!(
                        "mapping references unknown option ({}, {})",
                        entry.question_index, entry.option_index
                    ))
                })?;
            let result_type = result_types.get(entry.result_type_index).ok_or_else(|| {
                DomainError::internal(format!(
                    "mapping references unknown result type {}",
                    entry.result_type_index
                ))
            })?;

            self.repository
                .insert_scoring_mapping(ScoringMapping {
                    answer_option_id,
                    result_type_id: result_type.id,
                    weight: entry.weight,
                })
                .await?;
        }

        info!(
            quiz_id = %persisted_quiz.id,
            slug = %persisted_quiz.slug,
            questions = questions.len(),
            result_types = result_types.len(),
            mappings = mappings.mappings.len(),
            "quiz assembled"
        );

        Ok(AssembledQuiz {
            quiz: persisted_quiz,
            questions,
            options,
            result_types,
            mapping_count: mappings.mappings.len(),
        })
    }

    /// Derives a globally unique slug from the title. Collisions get a
    /// short random suffix; a title with no sluggable characters falls
    /// back to a timestamp-derived slug.
    async fn unique_slug(&self, title: &str) -> Result<String, DomainError> {
        let base = slugify(title);
        if base.is_empty() {
            return Ok(generated_slug());
        }

        if !self.repository.slug_exists(&base).await? {
            return Ok(base);
        }

        for _ in 0..SLUG_ATTEMPTS {
            let candidate = format!("{base}-{}", random_suffix());
            if !self.repository.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        Ok(generated_slug())
    }
}

fn random_suffix() -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..SLUG_SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Timestamp-derived fallback slug, base-36 millis for compactness.
fn generated_slug() -> String {
    let mut millis = chrono::Utc::now().timestamp_millis().unsigned_abs();
    let mut digits = Vec::new();
    loop {
        let d = (millis % 36) as u8;
        digits.push(if d < 10 { b'0' + d } else { b'a' + d - 10 });
        millis /= 36;
        if millis == 0 {
            break;
        }
    }
    digits.reverse();
    let encoded: String = digits.into_iter().map(char::from).collect();
    format!("quiz-{encoded}")
}
