//! Stage boundary artifacts.
//!
//! The JSON field names on these types are the machine-checkable contract
//! between the generator and the pipeline; they are addressed by array
//! position only until persistence assembly assigns real identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage 1 output: a condensed brand identity derived from website text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandSummary {
    pub brand_name: String,
    pub industry: String,
    pub target_audience: String,
    pub tone: String,
    /// 3 to 5 themes or values the brand emphasises.
    pub key_themes: Vec<String>,
    /// At least 20 characters.
    pub summary: String,
    /// Concrete offerings extracted from the site, used to ground
    /// recommendations in real products. Optional: older generator outputs
    /// omit it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products_or_services: Vec<ProductOrService>,
    /// What kind of personalised recommendation would be valuable for this
    /// brand's audience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_domain: Option<String>,
}

/// A nameable product, service, or offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOrService {
    pub name: String,
    pub description: String,
}

/// Stage 2 output: one candidate quiz concept. The caller picks exactly one
/// of the 3-5 generated candidates before stage 3 runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConcept {
    /// At most 80 characters.
    pub title: String,
    pub description: String,
    /// How the quiz outcome is framed to the taker (e.g. "personalised
    /// drink recipe").
    pub outcome_framing: String,
    /// 4 to 6 names for the concept's result types.
    pub result_type_names: Vec<String>,
    /// Psychographic/behavioural categories the questions should cover.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_dimensions: Vec<String>,
}

/// Stage 3 output: the full quiz structure, index-addressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQuiz {
    pub title: String,
    /// At least 20 characters; shown to the taker before the first question.
    pub intro_text: String,
    /// 8 to 12 questions.
    pub questions: Vec<GeneratedQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub text: String,
    pub question_type: QuestionType,
    /// Which of the concept's data dimensions this question captures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dimension: Option<String>,
    /// What the answer reveals about the respondent (brand-internal).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
    /// 3 to 6 options.
    pub options: Vec<GeneratedOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedOption {
    pub text: String,
}

/// How many options a respondent may select for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultiSelect,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::SingleChoice => write!(f, "single_choice"),
            QuestionType::MultiSelect => write!(f, "multi_select"),
        }
    }
}

/// Stage 4 output: result types plus the index-addressed scoring matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResultMappings {
    /// 4 to 8 result types.
    pub result_types: Vec<GeneratedResultType>,
    /// At least 10 entries; indices refer to the stage 3 quiz structure.
    pub mappings: Vec<MappingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResultType {
    pub name: String,
    /// At least 20 characters; why this result fits the respondent.
    pub description: String,
    /// The actual recommendation content delivered with the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_detail: Option<String>,
}

/// One weighted edge from an answer option to a result type, addressed by
/// zero-based array positions in the stage 3 output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub question_index: usize,
    pub option_index: usize,
    pub result_type_index: usize,
    /// 1 (weak), 2 (moderate), or 3 (strong indicator).
    pub weight: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_uses_snake_case_wire_format() {
        assert_eq!(
            serde_json::to_string(&QuestionType::SingleChoice).unwrap(),
            "\"single_choice\""
        );
        assert_eq!(
            serde_json::to_string(&QuestionType::MultiSelect).unwrap(),
            "\"multi_select\""
        );
    }

    #[test]
    fn brand_summary_tolerates_missing_supplemental_fields() {
        let json = r#"{
            "brand_name": "Acme Teas",
            "industry": "beverages",
            "target_audience": "health-conscious adults",
            "tone": "warm",
            "key_themes": ["wellness", "ritual", "sustainability"],
            "summary": "Acme Teas blends organic loose-leaf teas for daily rituals."
        }"#;
        let summary: BrandSummary = serde_json::from_str(json).unwrap();
        assert!(summary.products_or_services.is_empty());
        assert!(summary.recommendation_domain.is_none());
    }

    #[test]
    fn mapping_entry_round_trips() {
        let entry = MappingEntry {
            question_index: 2,
            option_index: 1,
            result_type_index: 0,
            weight: 3,
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: MappingEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }
}
