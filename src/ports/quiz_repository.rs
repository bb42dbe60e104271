//! Quiz Repository Port - persistence interface for the quiz aggregate.
//!
//! Inserts return the persisted record with its generated identifier, which
//! is what persistence assembly uses to translate array indices into
//! foreign keys. Repository errors are terminal for the current request;
//! the core never retries them.

use async_trait::async_trait;

use crate::domain::foundation::{AnswerOptionId, DomainError, QuizId};
use crate::domain::quiz::{
    AnswerOption, NewAnswerOption, NewQuestion, NewQuiz, NewResponse, NewResultType, Question,
    Quiz, QuizResponse, QuizStatus, ResultType, ScoringMapping,
};

/// Repository for quizzes, their structure, the scoring matrix, and
/// submitted responses.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Inserts a quiz, returning the persisted record with its identifier.
    async fn insert_quiz(&self, quiz: NewQuiz) -> Result<Quiz, DomainError>;

    /// Inserts a question belonging to an existing quiz.
    async fn insert_question(&self, question: NewQuestion) -> Result<Question, DomainError>;

    /// Inserts an answer option belonging to an existing question.
    async fn insert_answer_option(
        &self,
        option: NewAnswerOption,
    ) -> Result<AnswerOption, DomainError>;

    /// Inserts a result type belonging to an existing quiz.
    async fn insert_result_type(
        &self,
        result_type: NewResultType,
    ) -> Result<ResultType, DomainError>;

    /// Inserts one scoring matrix row. Fails with `DuplicateMapping` if a
    /// row for the same (answer option, result type) pair already exists.
    async fn insert_scoring_mapping(&self, mapping: ScoringMapping) -> Result<(), DomainError>;

    /// Persists a submitted response and its answer rows as one unit.
    async fn insert_response(&self, response: NewResponse) -> Result<QuizResponse, DomainError>;

    /// Returns whether any quiz already uses the given slug.
    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError>;

    /// Looks a quiz up by identifier.
    async fn find_quiz(&self, id: QuizId) -> Result<Option<Quiz>, DomainError>;

    /// Looks a quiz up by its public slug.
    async fn find_quiz_by_slug(&self, slug: &str) -> Result<Option<Quiz>, DomainError>;

    /// Updates a quiz's lifecycle status.
    async fn update_quiz_status(&self, id: QuizId, status: QuizStatus) -> Result<(), DomainError>;

    /// Returns the quiz's result types ordered by `sort_order`.
    async fn result_types_for_quiz(&self, quiz_id: QuizId) -> Result<Vec<ResultType>, DomainError>;

    /// Bulk lookup: all scoring rows whose answer option is in the set.
    async fn mappings_for_options(
        &self,
        option_ids: &[AnswerOptionId],
    ) -> Result<Vec<ScoringMapping>, DomainError>;
}
