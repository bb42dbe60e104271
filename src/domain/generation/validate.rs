//! Stage boundary validation.
//!
//! Each stage has a structural validator (shape, types, bounds) returning
//! either the typed artifact or a human-readable violation description, and
//! stages 3 and 4 additionally have business-rule validators enforcing
//! cross-referential constraints. Violation text is fed back verbatim into
//! the next generation attempt, so every message states the defect precisely.

use serde_json::Value;
use std::collections::{HashMap, HashSet};

use super::artifacts::{
    BrandSummary, GeneratedQuiz, GeneratedResultMappings, QuizConcept,
};

const MIN_QUESTIONS: usize = 8;
const MAX_QUESTIONS: usize = 12;
const MIN_OPTIONS: usize = 3;
const MAX_OPTIONS: usize = 6;
const MIN_RESULT_TYPES: usize = 4;
const MAX_RESULT_TYPES: usize = 8;
const MIN_MAPPINGS: usize = 10;
// The stage 4 prompt asks the generator for at least 5 mappings per result
// type; the enforced minimum is deliberately lower so the retry loop does not
// reject usable outputs.
const MIN_MAPPINGS_PER_RESULT: usize = 2;

/// Stage 1: brand summary.
pub fn brand_summary(value: Value) -> Result<BrandSummary, String> {
    let summary: BrandSummary = serde_json::from_value(value)
        .map_err(|e| format!("Brand summary does not match the expected shape: {e}"))?;

    require_non_empty("brand_name", &summary.brand_name)?;
    require_non_empty("industry", &summary.industry)?;
    require_non_empty("target_audience", &summary.target_audience)?;
    require_non_empty("tone", &summary.tone)?;

    let themes = summary.key_themes.len();
    if !(3..=5).contains(&themes) {
        return Err(format!("key_themes must contain 3 to 5 entries, got {themes}"));
    }
    if summary.key_themes.iter().any(|t| t.trim().is_empty()) {
        return Err("key_themes entries must not be empty".to_string());
    }
    if summary.summary.chars().count() < 20 {
        return Err("summary must be at least 20 characters".to_string());
    }

    Ok(summary)
}

/// Stage 2: 3-5 candidate quiz concepts.
pub fn quiz_concepts(value: Value) -> Result<Vec<QuizConcept>, String> {
    let concepts: Vec<QuizConcept> = serde_json::from_value(value)
        .map_err(|e| format!("Concept list does not match the expected shape: {e}"))?;

    let count = concepts.len();
    if !(3..=5).contains(&count) {
        return Err(format!("Expected 3 to 5 quiz concepts, got {count}"));
    }

    for (i, concept) in concepts.iter().enumerate() {
        if concept.title.trim().is_empty() {
            return Err(format!("Concept {} has an empty title", i + 1));
        }
        if concept.title.chars().count() > 80 {
            return Err(format!(
                "Concept {} title exceeds 80 characters",
                i + 1
            ));
        }
        if concept.description.trim().is_empty() {
            return Err(format!("Concept {} has an empty description", i + 1));
        }
        if concept.outcome_framing.trim().is_empty() {
            return Err(format!("Concept {} has an empty outcome_framing", i + 1));
        }
        let names = concept.result_type_names.len();
        if !(4..=6).contains(&names) {
            return Err(format!(
                "Concept {} must name 4 to 6 result types, got {names}",
                i + 1
            ));
        }
        if concept.result_type_names.iter().any(|n| n.trim().is_empty()) {
            return Err(format!("Concept {} has an empty result type name", i + 1));
        }
    }

    Ok(concepts)
}

/// Stage 3: quiz structure (shape and bounds).
pub fn generated_quiz(value: Value) -> Result<GeneratedQuiz, String> {
    let quiz: GeneratedQuiz = serde_json::from_value(value)
        .map_err(|e| format!("Quiz structure does not match the expected shape: {e}"))?;

    require_non_empty("title", &quiz.title)?;
    if quiz.intro_text.chars().count() < 20 {
        return Err("intro_text must be at least 20 characters".to_string());
    }

    let questions = quiz.questions.len();
    if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&questions) {
        return Err(format!(
            "Expected {MIN_QUESTIONS}-{MAX_QUESTIONS} questions, got {questions}"
        ));
    }
    for (i, question) in quiz.questions.iter().enumerate() {
        if question.text.trim().is_empty() {
            return Err(format!("Question {} has empty text", i + 1));
        }
        let options = question.options.len();
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&options) {
            return Err(format!(
                "Question {} has {options} options (expected {MIN_OPTIONS}-{MAX_OPTIONS})",
                i + 1
            ));
        }
        if question.options.iter().any(|o| o.text.trim().is_empty()) {
            return Err(format!("Question {} has an option with empty text", i + 1));
        }
    }

    Ok(quiz)
}

/// Stage 4: result types and scoring matrix (shape and bounds).
pub fn result_mappings(value: Value) -> Result<GeneratedResultMappings, String> {
    let mappings: GeneratedResultMappings = serde_json::from_value(value)
        .map_err(|e| format!("Result mappings do not match the expected shape: {e}"))?;

    let types = mappings.result_types.len();
    if !(MIN_RESULT_TYPES..=MAX_RESULT_TYPES).contains(&types) {
        return Err(format!(
            "Expected {MIN_RESULT_TYPES}-{MAX_RESULT_TYPES} result types, got {types}"
        ));
    }
    for (i, rt) in mappings.result_types.iter().enumerate() {
        if rt.name.trim().is_empty() {
            return Err(format!("Result type {} has an empty name", i + 1));
        }
        if rt.description.chars().count() < 20 {
            return Err(format!(
                "Result type \"{}\" needs a description of at least 20 characters",
                rt.name
            ));
        }
    }

    let entries = mappings.mappings.len();
    if entries < MIN_MAPPINGS {
        return Err(format!(
            "Expected at least {MIN_MAPPINGS} mapping entries, got {entries}"
        ));
    }
    for entry in &mappings.mappings {
        if !(1..=3).contains(&entry.weight) {
            return Err(format!(
                "Mapping weight must be 1, 2 or 3, got {}",
                entry.weight
            ));
        }
    }

    Ok(mappings)
}

/// Business rules for stage 3, re-checked independently of the schema bounds.
///
/// The business validator is the authority that triggers retries, so its
/// bounds must agree with the schema bounds or the loop could retry forever
/// without ever satisfying this check.
pub fn quiz_structure_rules(quiz: &GeneratedQuiz) -> Option<String> {
    let questions = quiz.questions.len();
    if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&questions) {
        return Some(format!(
            "Expected {MIN_QUESTIONS}-{MAX_QUESTIONS} questions, got {questions}"
        ));
    }

    for (i, question) in quiz.questions.iter().enumerate() {
        let options = question.options.len();
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&options) {
            return Some(format!(
                "Question {} has {options} options (expected {MIN_OPTIONS}-{MAX_OPTIONS})",
                i + 1
            ));
        }
    }

    None
}

/// Business rules for stage 4: every index must resolve against the actual
/// stage 3 output, and every result type must be referenced by at least
/// [`MIN_MAPPINGS_PER_RESULT`] mappings.
pub fn result_mappings_rules(
    mappings: &GeneratedResultMappings,
    quiz: &GeneratedQuiz,
) -> Option<String> {
    let num_questions = quiz.questions.len();
    let num_result_types = mappings.result_types.len();

    if !(MIN_RESULT_TYPES..=MAX_RESULT_TYPES).contains(&num_result_types) {
        return Some(format!(
            "Expected {MIN_RESULT_TYPES}-{MAX_RESULT_TYPES} result types, got {num_result_types}"
        ));
    }

    for entry in &mappings.mappings {
        if entry.question_index >= num_questions {
            return Some(format!(
                "Mapping references question_index {} but only {} questions exist",
                entry.question_index, num_questions
            ));
        }
        let options = quiz.questions[entry.question_index].options.len();
        if entry.option_index >= options {
            return Some(format!(
                "Mapping references option_index {} for question {} but only {} options exist",
                entry.option_index, entry.question_index, options
            ));
        }
        if entry.result_type_index >= num_result_types {
            return Some(format!(
                "Mapping references result_type_index {} but only {} result types exist",
                entry.result_type_index, num_result_types
            ));
        }
    }

    // Duplicates would collide with the one-row-per-pair persistence
    // constraint mid-assembly; catching them here makes the defect
    // retryable feedback instead.
    let mut seen = HashSet::new();
    for entry in &mappings.mappings {
        let key = (entry.question_index, entry.option_index, entry.result_type_index);
        if !seen.insert(key) {
            return Some(format!(
                "Duplicate mapping for question_index {}, option_index {} and result_type_index {}",
                entry.question_index, entry.option_index, entry.result_type_index
            ));
        }
    }

    let mut counts: HashMap<usize, usize> = HashMap::new();
    for entry in &mappings.mappings {
        *counts.entry(entry.result_type_index).or_insert(0) += 1;
    }
    for (i, rt) in mappings.result_types.iter().enumerate() {
        let count = counts.get(&i).copied().unwrap_or(0);
        if count < MIN_MAPPINGS_PER_RESULT {
            return Some(format!(
                "Result type \"{}\" has only {} mappings (need at least {})",
                rt.name, count, MIN_MAPPINGS_PER_RESULT
            ));
        }
    }

    None
}

fn require_non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} must not be empty"))
    } else {
        Ok(())
    }
}
