//! Persisted records of the quiz aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AnswerOptionId, QuestionId, QuizId, ResponseId, ResultTypeId,
};
use crate::domain::generation::{QuestionType, QuizConcept};

/// Lifecycle status of a quiz. Only `Live` quizzes accept responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizStatus {
    Draft,
    Live,
    Closed,
}

/// A persisted quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: QuizId,
    /// Globally unique, URL-safe identifier for the public quiz page.
    pub slug: String,
    pub title: String,
    /// The generated intro text shown before the first question.
    pub description: String,
    pub status: QuizStatus,
    /// Snapshot of the concept this quiz was generated from.
    pub concept: Option<QuizConcept>,
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a quiz; the repository assigns the identifier.
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub status: QuizStatus,
    pub concept: Option<QuizConcept>,
}

/// A persisted question, ordered within its quiz by `sort_order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub quiz_id: QuizId,
    pub sort_order: u32,
    pub text: String,
    pub question_type: QuestionType,
    pub insight: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub quiz_id: QuizId,
    pub sort_order: u32,
    pub text: String,
    pub question_type: QuestionType,
    pub insight: Option<String>,
}

/// A persisted answer option, ordered within its question by `sort_order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: AnswerOptionId,
    pub question_id: QuestionId,
    pub sort_order: u32,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct NewAnswerOption {
    pub question_id: QuestionId,
    pub sort_order: u32,
    pub text: String,
}

/// A persisted result type. `sort_order` is the canonical order used for
/// scoring tie-breaks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultType {
    pub id: ResultTypeId,
    pub quiz_id: QuizId,
    pub sort_order: u32,
    pub name: String,
    pub description: String,
    pub recommendation_detail: Option<String>,
    pub colour: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewResultType {
    pub quiz_id: QuizId,
    pub sort_order: u32,
    pub name: String,
    pub description: String,
    pub recommendation_detail: Option<String>,
    pub colour: Option<String>,
}

/// The durable form of the scoring matrix: one weighted edge between an
/// answer option and a result type. At most one row exists per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringMapping {
    pub answer_option_id: AnswerOptionId,
    pub result_type_id: ResultTypeId,
    /// Small positive integer, 1 to 3.
    pub weight: u8,
}

/// A submitted response. Created once on submission and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub id: ResponseId,
    pub quiz_id: QuizId,
    /// The winning result type computed at submission time.
    pub result_type_id: ResultTypeId,
    pub respondent_email: Option<String>,
    pub answers: Vec<ResponseAnswer>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewResponse {
    pub quiz_id: QuizId,
    pub result_type_id: ResultTypeId,
    pub respondent_email: Option<String>,
    pub answers: Vec<ResponseAnswer>,
}

/// One answered question within a response. A `multi_select` question may
/// contribute several of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseAnswer {
    pub question_id: QuestionId,
    pub answer_option_id: AnswerOptionId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_status_uses_lowercase_wire_format() {
        assert_eq!(serde_json::to_string(&QuizStatus::Draft).unwrap(), "\"draft\"");
        assert_eq!(serde_json::to_string(&QuizStatus::Live).unwrap(), "\"live\"");
        assert_eq!(serde_json::to_string(&QuizStatus::Closed).unwrap(), "\"closed\"");
    }
}
