//! Stage prompt builders.
//!
//! Each builder is a pure function of its typed inputs, so prompt content
//! can be unit tested apart from the retry loop that consumes it.

mod brand_summary;
mod quiz_concepts;
mod quiz_structure;
mod result_mappings;

pub use brand_summary::brand_summary_prompt;
pub use quiz_concepts::quiz_concepts_prompt;
pub use quiz_structure::quiz_structure_prompt;
pub use result_mappings::result_mappings_prompt;

/// Serialises an artifact for embedding in a prompt. Serialisation of our
/// own derive types cannot fail, so a failure collapses to an empty block.
fn to_pretty_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
