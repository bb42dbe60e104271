//! Stage 3 prompt: chosen concept to full quiz structure.

use super::to_pretty_json;
use crate::domain::generation::artifacts::{BrandSummary, QuizConcept};

/// Builds the quiz structure prompt from the brand summary and the concept
/// the user selected.
pub fn quiz_structure_prompt(brand_summary: &BrandSummary, concept: &QuizConcept) -> String {
    let summary_json = to_pretty_json(brand_summary);
    let concept_json = to_pretty_json(concept);

    let dimension_note = if concept.data_dimensions.is_empty() {
        "Spread the questions across distinct psychographic and behavioural angles.".to_string()
    } else {
        format!(
            "Generate at least one question per data dimension listed in the concept ({}).",
            concept.data_dimensions.join(", ")
        )
    };

    format!(
        r#"You are a quiz design expert who creates engaging quizzes that capture psychographic and behavioural data whilst delivering personalised recommendations.

<brand_summary>
{summary_json}
</brand_summary>

<selected_concept>
{concept_json}
</selected_concept>

Generate a complete quiz with:

1. An engaging introduction text (2-3 sentences, British English, friendly tone). This is shown to the quiz taker before they begin. It should mention they'll receive a personalised recommendation.

2. 8-12 questions, each with 4 answer options. {dimension_note}

3. Each question must include:
   - "data_dimension": which data category this question maps to
   - "insight": a short explanation of what psychographic/behavioural data this question captures about the respondent (for the brand's internal use only, NOT shown to quiz takers).

4. Question design guidelines:
   - Questions should feel fun and conversational, never clinical or survey-like.
   - Avoid direct demographic questions (age, income, location).
   - Each question should help differentiate between the possible recommendations: {result_names}.
   - Answer options should represent distinct lifestyle choices or preferences that naturally map to different recommendations.
   - Questions should capture preferences, behaviours, and values NON-DIRECTLY - e.g. "How do you usually kick off your morning?" instead of "How often do you exercise?"
   - All questions should be single_choice type.

Return a JSON object with exactly this structure:
{{
  "title": "{title}",
  "intro_text": "engaging 2-3 sentence introduction mentioning they'll get a personalised recommendation",
  "questions": [
    {{
      "text": "question text here",
      "question_type": "single_choice",
      "data_dimension": "lifestyle preferences",
      "insight": "Indicates fitness level, routine structure, and health consciousness",
      "options": [
        {{ "text": "option A text" }},
        {{ "text": "option B text" }},
        {{ "text": "option C text" }},
        {{ "text": "option D text" }}
      ]
    }}
  ]
}}

Important:
- 8-12 questions.
- 4 options per question.
- British English throughout.
- No duplicate or near-duplicate questions.
- Every question must have a data_dimension and insight field.

Return ONLY the JSON object, no other text or explanation."#,
        result_names = concept.result_type_names.join(", "),
        title = concept.title,
    )
}
