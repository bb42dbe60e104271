//! Error types for persistence-side and request-level failures.
//!
//! Generation-time failures (parse, schema, business rule, transport) live in
//! the orchestrator's own retry taxonomy; the errors here are terminal for the
//! current request and are never retried.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    QuizNotFound,
    QuestionNotFound,
    AnswerOptionNotFound,
    ResultTypeNotFound,

    // State errors
    QuizNotLive,
    DuplicateMapping,
    DuplicateSlug,

    // Authorization errors
    OwnershipDenied,

    // Infrastructure errors
    StorageError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::QuizNotFound => "QUIZ_NOT_FOUND",
            ErrorCode::QuestionNotFound => "QUESTION_NOT_FOUND",
            ErrorCode::AnswerOptionNotFound => "ANSWER_OPTION_NOT_FOUND",
            ErrorCode::ResultTypeNotFound => "RESULT_TYPE_NOT_FOUND",
            ErrorCode::QuizNotLive => "QUIZ_NOT_LIVE",
            ErrorCode::DuplicateMapping => "DUPLICATE_MAPPING",
            ErrorCode::DuplicateSlug => "DUPLICATE_SLUG",
            ErrorCode::OwnershipDenied => "OWNERSHIP_DENIED",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field)
    }

    /// Creates a quiz-not-found error.
    pub fn quiz_not_found(reference: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::QuizNotFound,
            format!("Quiz '{}' not found", reference),
        )
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
