//! Weighted-additive scoring engine.
//!
//! For each selected answer option, every mapping row adds its weight to the
//! referenced result type's accumulator; the result type with the strictly
//! greatest total wins, with ties broken by the quiz's canonical sort order.
//! Every score is explainable as a sum of human-readable weight
//! contributions, which is what makes the classifier brand-auditable.

use std::collections::{HashMap, HashSet};

use crate::domain::foundation::{AnswerOptionId, ResultTypeId};
use crate::domain::quiz::{ResultType, ScoringMapping};

/// The winning result type for a completed response.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    pub result_type_id: ResultTypeId,
    pub name: String,
    pub description: String,
    pub recommendation_detail: Option<String>,
    pub colour: Option<String>,
    pub score: u32,
}

/// Computes the winning result type for a selection of answer options.
///
/// `result_types` are the quiz's result types; `mappings` are the scoring
/// rows relevant to the quiz (rows whose option is not selected are
/// ignored). Returns `None` when the quiz has no result types or nothing
/// was selected.
///
/// Contributions are strictly additive and never capped: one selected
/// option may feed several result types, and several options may feed the
/// same result type. At equal totals the result type with the lowest
/// `sort_order` wins, deterministically.
pub fn compute_result(
    result_types: &[ResultType],
    mappings: &[ScoringMapping],
    selected: &HashSet<AnswerOptionId>,
) -> Option<ScoreOutcome> {
    if result_types.is_empty() || selected.is_empty() {
        return None;
    }

    // Canonical order for the tie-break.
    let mut ordered: Vec<&ResultType> = result_types.iter().collect();
    ordered.sort_by_key(|rt| rt.sort_order);

    let mut scores: HashMap<ResultTypeId, u32> =
        ordered.iter().map(|rt| (rt.id, 0)).collect();

    for mapping in mappings {
        if !selected.contains(&mapping.answer_option_id) {
            continue;
        }
        if let Some(total) = scores.get_mut(&mapping.result_type_id) {
            *total += u32::from(mapping.weight);
        }
    }

    let mut winner = ordered[0];
    let mut top_score = scores.get(&winner.id).copied().unwrap_or(0);
    for rt in &ordered[1..] {
        let score = scores.get(&rt.id).copied().unwrap_or(0);
        if score > top_score {
            top_score = score;
            winner = rt;
        }
    }

    Some(ScoreOutcome {
        result_type_id: winner.id,
        name: winner.name.clone(),
        description: winner.description.clone(),
        recommendation_detail: winner.recommendation_detail.clone(),
        colour: winner.colour.clone(),
        score: top_score,
    })
}
