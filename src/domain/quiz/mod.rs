//! The persisted quiz aggregate.
//!
//! Assembly translates the index-addressed pipeline artifacts into these
//! identifier-addressed records. Array positions never leak into persisted
//! form; `sort_order` preserves creation order and is the canonical order
//! used for scoring tie-breaks.

mod records;
mod slug;

pub use records::{
    AnswerOption, NewAnswerOption, NewQuestion, NewQuiz, NewResponse, NewResultType, Question,
    Quiz, QuizResponse, QuizStatus, ResponseAnswer, ResultType, ScoringMapping,
};
pub use slug::slugify;

/// Default palette for result-type colours, assigned round-robin in
/// creation order.
pub const DEFAULT_COLOURS: [&str; 8] = [
    "#6C5CE7", "#00B894", "#E17055", "#0984E3", "#FDCB6E", "#E84393", "#00CEC9", "#636E72",
];
