//! Foundation types shared across the domain: identifiers and errors.

mod errors;
mod ids;

pub use errors::{DomainError, ErrorCode};
pub use ids::{AnswerOptionId, QuestionId, QuizId, ResponseId, ResultTypeId};
