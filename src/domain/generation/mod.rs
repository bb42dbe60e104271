//! Generation-pipeline value objects and pure checks.
//!
//! Each of the four pipeline stages produces one artifact defined in
//! [`artifacts`]; [`extract`] recovers JSON from free-form model output,
//! [`validate`] checks each stage's structural and business rules, and
//! [`prompts`] builds the stage instructions.

pub mod artifacts;
pub mod extract;
pub mod prompts;
pub mod validate;

pub use artifacts::{
    BrandSummary, GeneratedOption, GeneratedQuestion, GeneratedQuiz, GeneratedResultMappings,
    GeneratedResultType, MappingEntry, ProductOrService, QuestionType, QuizConcept,
};
pub use extract::{extract_json, ExtractError};
