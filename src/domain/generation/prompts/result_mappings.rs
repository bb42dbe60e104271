//! Stage 4 prompt: quiz structure to result types and scoring matrix.

use super::to_pretty_json;
use crate::domain::generation::artifacts::{BrandSummary, GeneratedQuiz};

/// Builds the result-mapping prompt. Index ranges are spelled out against
/// the actual stage 3 output so the generator addresses the exact index
/// space the business validator will check.
pub fn result_mappings_prompt(
    quiz: &GeneratedQuiz,
    result_type_names: &[String],
    brand_summary: &BrandSummary,
) -> String {
    let summary_json = to_pretty_json(brand_summary);
    let quiz_json = to_pretty_json(quiz);
    let names_json = serde_json::to_string(result_type_names).unwrap_or_default();

    format!(
        r#"You are a quiz design expert creating personalised recommendation results for a brand quiz.

<brand_summary>
{summary_json}
</brand_summary>

<quiz_structure>
{quiz_json}
</quiz_structure>

<recommendation_names>
{names_json}
</recommendation_names>

For each recommendation, produce:
1. A "description" - 2-3 sentences explaining WHY this recommendation is perfect for the quiz-taker, based on the pattern of answers that would lead to it. Written in second person ("You..."), positive and enthusiastic tone.
2. A "recommendation_detail" - the actual valuable output. This is the specific, actionable recommendation the quiz-taker receives. It should:
   - Reference the brand's actual products or services where possible
   - Be concrete and specific (e.g. a recipe with ingredients, a routine with steps, a product combination with usage tips)
   - Be 2-4 sentences

Also produce a scoring matrix that maps each answer option to the recommendations it indicates.

For the scoring matrix:
- Each answer option should map to 1-3 recommendations.
- Use weights: 3 (strong indicator), 2 (moderate indicator), 1 (weak indicator).
- Think about answer combinations: someone who chose an active lifestyle + fruity preferences + health-focused should strongly map to a health-oriented recommendation.
- Ensure every recommendation has a roughly balanced number of answer options pointing to it (at least 5 mappings each).
- Ensure every answer option maps to at least one recommendation.
- The mappings should make logical sense - an answer about being adventurous should map to more adventurous recommendations.

Return a JSON object with exactly this structure:
{{
  "result_types": [
    {{
      "name": "Recommendation Name",
      "description": "2-3 sentences explaining why this is perfect for them",
      "recommendation_detail": "2-4 sentences with specific, actionable recommendation content referencing brand products"
    }}
  ],
  "mappings": [
    {{
      "question_index": 0,
      "option_index": 0,
      "result_type_index": 0,
      "weight": 3
    }}
  ]
}}

Important:
- question_index is 0-based (0 to {max_question_index}).
- option_index is 0-based.
- result_type_index is 0-based (0 to {max_result_index}).
- weight must be 1, 2, or 3.
- Every answer option must appear at least once in the mappings.
- Every recommendation must have at least 5 mappings.
- Use British English throughout.

Return ONLY the JSON object, no other text or explanation."#,
        max_question_index = quiz.questions.len().saturating_sub(1),
        max_result_index = result_type_names.len().saturating_sub(1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::artifacts::{
        GeneratedOption, GeneratedQuestion, QuestionType,
    };

    fn inputs() -> (GeneratedQuiz, Vec<String>, BrandSummary) {
        let quiz = GeneratedQuiz {
            title: "Discover Your Perfect Blend!".to_string(),
            intro_text: "Answer a few quick questions to get your match.".to_string(),
            questions: (0..9)
                .map(|i| GeneratedQuestion {
                    text: format!("Question {}?", i + 1),
                    question_type: QuestionType::SingleChoice,
                    data_dimension: None,
                    insight: None,
                    options: (0..4)
                        .map(|o| GeneratedOption {
                            text: format!("Option {}", o + 1),
                        })
                        .collect(),
                })
                .collect(),
        };
        let names = vec![
            "Calm Chamomile".to_string(),
            "Bold Breakfast".to_string(),
            "Green Focus".to_string(),
            "Spiced Chai".to_string(),
        ];
        let summary = BrandSummary {
            brand_name: "Acme Teas".to_string(),
            industry: "beverages".to_string(),
            target_audience: "health-conscious adults".to_string(),
            tone: "warm".to_string(),
            key_themes: vec!["wellness".into(), "ritual".into(), "sustainability".into()],
            summary: "Acme Teas blends organic loose-leaf teas for daily rituals.".to_string(),
            products_or_services: vec![],
            recommendation_domain: None,
        };
        (quiz, names, summary)
    }

    #[test]
    fn prompt_states_zero_based_index_ranges() {
        let (quiz, names, summary) = inputs();
        let prompt = result_mappings_prompt(&quiz, &names, &summary);
        assert!(prompt.contains("0 to 8")); // 9 questions
        assert!(prompt.contains("0 to 3")); // 4 result types
    }

    #[test]
    fn prompt_embeds_quiz_and_names() {
        let (quiz, names, summary) = inputs();
        let prompt = result_mappings_prompt(&quiz, &names, &summary);
        assert!(prompt.contains("\"title\": \"Discover Your Perfect Blend!\""));
        assert!(prompt.contains("Spiced Chai"));
    }
}
