//! Response submission: score a visitor's answers and persist the outcome.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{AnswerOptionId, DomainError, ErrorCode};
use crate::domain::quiz::{NewResponse, QuizResponse, QuizStatus, ResponseAnswer};
use crate::domain::scoring::{compute_result, ScoreOutcome};
use crate::ports::QuizRepository;

/// A visitor's completed quiz, addressed by the quiz's public slug.
#[derive(Debug, Clone)]
pub struct SubmitResponseCommand {
    pub slug: String,
    pub answers: Vec<ResponseAnswer>,
    pub respondent_email: Option<String>,
}

/// The persisted response together with its computed outcome.
#[derive(Debug, Clone)]
pub struct SubmitResponseResult {
    pub response: QuizResponse,
    pub outcome: ScoreOutcome,
}

/// Scores and persists quiz responses. Submission is the only moment a
/// result is computed; the stored response carries the winner forever.
pub struct SubmitResponseHandler {
    repository: Arc<dyn QuizRepository>,
}

impl SubmitResponseHandler {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        command: SubmitResponseCommand,
    ) -> Result<SubmitResponseResult, DomainError> {
        let quiz = self
            .repository
            .find_quiz_by_slug(&command.slug)
            .await?
            .ok_or_else(|| DomainError::quiz_not_found(&command.slug))?;

        if quiz.status != QuizStatus::Live {
            return Err(DomainError::new(
                ErrorCode::QuizNotLive,
                format!("Quiz \"{}\" is not accepting responses", quiz.slug),
            ));
        }

        if command.answers.is_empty() {
            return Err(DomainError::validation(
                "answers",
                "A response must answer at least one question",
            ));
        }

        let selected: HashSet<AnswerOptionId> = command
            .answers
            .iter()
            .map(|answer| answer.answer_option_id)
            .collect();
        let option_ids: Vec<AnswerOptionId> = selected.iter().copied().collect();

        let result_types = self.repository.result_types_for_quiz(quiz.id).await?;
        let mappings = self.repository.mappings_for_options(&option_ids).await?;

        let outcome = compute_result(&result_types, &mappings, &selected).ok_or_else(|| {
            DomainError::internal(format!("Quiz \"{}\" has no result types", quiz.slug))
        })?;

        let response = self
            .repository
            .insert_response(NewResponse {
                quiz_id: quiz.id,
                result_type_id: outcome.result_type_id,
                respondent_email: command.respondent_email,
                answers: command.answers,
            })
            .await?;

        info!(
            quiz_id = %quiz.id,
            response_id = %response.id,
            result = %outcome.name,
            score = outcome.score,
            "response scored"
        );

        Ok(SubmitResponseResult { response, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::InMemoryQuizRepository;
    use crate::domain::generation::QuestionType;
    use crate::domain::quiz::{
        AnswerOption, NewAnswerOption, NewQuestion, NewQuiz, NewResultType, ResultType,
        ScoringMapping,
    };

    struct Fixture {
        repository: Arc<InMemoryQuizRepository>,
        handler: SubmitResponseHandler,
        slug: String,
        options: Vec<AnswerOption>,
        result_types: Vec<ResultType>,
    }

    /// One live quiz with two questions of two options each and two result
    /// types. Option (0,0) and (1,0) point at "First"; option (0,1) and
    /// (1,1) point at "Second" with a heavier weight.
    async fn fixture() -> Fixture {
        let repository = Arc::new(InMemoryQuizRepository::new());
        let quiz = repository
            .insert_quiz(NewQuiz {
                slug: "blend-finder".to_string(),
                title: "Blend Finder".to_string(),
                description: "Find your blend.".to_string(),
                status: QuizStatus::Draft,
                concept: None,
            })
            .await
            .unwrap();

        let mut options = Vec::new();
        for q in 0..2u32 {
            let question = repository
                .insert_question(NewQuestion {
                    quiz_id: quiz.id,
                    sort_order: q,
                    text: format!("Question {}?", q + 1),
                    question_type: QuestionType::SingleChoice,
                    insight: None,
                })
                .await
                .unwrap();
            for o in 0..2u32 {
                let option = repository
                    .insert_answer_option(NewAnswerOption {
                        question_id: question.id,
                        sort_order: o,
                        text: format!("Option {}", o + 1),
                    })
                    .await
                    .unwrap();
                options.push(option);
            }
        }

        let mut result_types = Vec::new();
        for (i, name) in ["First", "Second"].into_iter().enumerate() {
            let rt = repository
                .insert_result_type(NewResultType {
                    quiz_id: quiz.id,
                    sort_order: i as u32,
                    name: name.to_string(),
                    description: format!("{name} blend."),
                    recommendation_detail: None,
                    colour: None,
                })
                .await
                .unwrap();
            result_types.push(rt);
        }

        // options[0], options[2] are each question's first option.
        for (opt, rt, weight) in [
            (0usize, 0usize, 1u8),
            (2, 0, 1),
            (1, 1, 3),
            (3, 1, 3),
        ] {
            repository
                .insert_scoring_mapping(ScoringMapping {
                    answer_option_id: options[opt].id,
                    result_type_id: result_types[rt].id,
                    weight,
                })
                .await
                .unwrap();
        }

        repository
            .update_quiz_status(quiz.id, QuizStatus::Live)
            .await
            .unwrap();

        Fixture {
            handler: SubmitResponseHandler::new(repository.clone()),
            repository,
            slug: quiz.slug,
            options,
            result_types,
        }
    }

    fn answer(option: &AnswerOption) -> ResponseAnswer {
        ResponseAnswer {
            question_id: option.question_id,
            answer_option_id: option.id,
        }
    }

    #[tokio::test]
    async fn scores_and_persists_a_response() {
        let fx = fixture().await;

        let result = fx
            .handler
            .handle(SubmitResponseCommand {
                slug: fx.slug.clone(),
                answers: vec![answer(&fx.options[1]), answer(&fx.options[3])],
                respondent_email: Some("tea@example.com".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(result.outcome.name, "Second");
        assert_eq!(result.outcome.score, 6);
        assert_eq!(result.response.result_type_id, fx.result_types[1].id);
        assert_eq!(
            result.response.respondent_email.as_deref(),
            Some("tea@example.com")
        );
        assert_eq!(fx.repository.response_count(), 1);
    }

    #[tokio::test]
    async fn tie_goes_to_the_earlier_result_type() {
        let fx = fixture().await;

        // One answer per result type, but weights 1 vs 3 favour "Second";
        // pick both first options so "First" gets 2 and nothing else scores.
        let result = fx
            .handler
            .handle(SubmitResponseCommand {
                slug: fx.slug.clone(),
                answers: vec![answer(&fx.options[0]), answer(&fx.options[2])],
                respondent_email: None,
            })
            .await
            .unwrap();

        assert_eq!(result.outcome.name, "First");
        assert_eq!(result.outcome.score, 2);
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let fx = fixture().await;
        let err = fx
            .handler
            .handle(SubmitResponseCommand {
                slug: "no-such-quiz".to_string(),
                answers: vec![answer(&fx.options[0])],
                respondent_email: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::QuizNotFound);
    }

    #[tokio::test]
    async fn draft_quiz_rejects_responses() {
        let fx = fixture().await;
        let quiz = fx
            .repository
            .find_quiz_by_slug(&fx.slug)
            .await
            .unwrap()
            .unwrap();
        fx.repository
            .update_quiz_status(quiz.id, QuizStatus::Draft)
            .await
            .unwrap();

        let err = fx
            .handler
            .handle(SubmitResponseCommand {
                slug: fx.slug.clone(),
                answers: vec![answer(&fx.options[0])],
                respondent_email: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::QuizNotLive);
        assert_eq!(fx.repository.response_count(), 0);
    }

    #[tokio::test]
    async fn closed_quiz_rejects_responses() {
        let fx = fixture().await;
        let quiz = fx
            .repository
            .find_quiz_by_slug(&fx.slug)
            .await
            .unwrap()
            .unwrap();
        fx.repository
            .update_quiz_status(quiz.id, QuizStatus::Closed)
            .await
            .unwrap();

        let err = fx
            .handler
            .handle(SubmitResponseCommand {
                slug: fx.slug.clone(),
                answers: vec![answer(&fx.options[0])],
                respondent_email: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::QuizNotLive);
    }

    #[tokio::test]
    async fn empty_answers_fail_validation() {
        let fx = fixture().await;
        let err = fx
            .handler
            .handle(SubmitResponseCommand {
                slug: fx.slug.clone(),
                answers: vec![],
                respondent_email: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn unmapped_options_still_produce_a_winner() {
        let fx = fixture().await;
        // An option id the matrix has never seen contributes nothing, and
        // the zero-score tie falls to the earliest result type.
        let stray = ResponseAnswer {
            question_id: fx.options[0].question_id,
            answer_option_id: crate::domain::foundation::AnswerOptionId::new(),
        };
        let result = fx
            .handler
            .handle(SubmitResponseCommand {
                slug: fx.slug.clone(),
                answers: vec![stray],
                respondent_email: None,
            })
            .await
            .unwrap();
        assert_eq!(result.outcome.name, "First");
        assert_eq!(result.outcome.score, 0);
    }
}
