//! JSON recovery from free-form model output.
//!
//! Model responses may wrap the requested JSON in commentary or markdown
//! fencing. The extractor tolerates that by trying a fixed sequence of
//! locations; it never guesses content, only where the JSON sits.

use serde_json::Value;
use thiserror::Error;

/// No structured value could be recovered from the response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("No JSON object or array found in AI response")]
    NoJsonFound,

    #[error("Failed to extract valid JSON from AI response")]
    Unparseable,
}

/// Attempts to extract a JSON value from an AI response string.
///
/// Ordered attempts, first success wins:
/// 1. parse the trimmed text directly;
/// 2. parse the contents of the first fenced code block;
/// 3. from the first `{` or `[`, take the balanced-bracket substring
///    (respecting string literals and escapes) and parse it;
/// 4. parse the whole substring from the first bracket onward.
pub fn extract_json(raw: &str) -> Result<Value, ExtractError> {
    let trimmed = raw.trim();

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    if let Some(inner) = fenced_block(trimmed) {
        if let Ok(value) = serde_json::from_str(inner) {
            return Ok(value);
        }
    }

    let object_start = trimmed.find('{');
    let array_start = trimmed.find('[');
    let start = match (object_start, array_start) {
        (None, None) => return Err(ExtractError::NoJsonFound),
        (Some(o), None) => o,
        (None, Some(a)) => a,
        (Some(o), Some(a)) => o.min(a),
    };

    let sub = &trimmed[start..];

    if let Some(balanced) = balanced_prefix(sub) {
        if let Ok(value) = serde_json::from_str(balanced) {
            return Ok(value);
        }
    }

    // Last resort: the whole tail from the first bracket.
    serde_json::from_str(sub).map_err(|_| ExtractError::Unparseable)
}

/// Returns the trimmed contents of the first triple-backtick block, if any.
/// An optional `json` language tag after the opening fence is skipped.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after = &text[open + 3..];
    let after = after.strip_prefix("json").unwrap_or(after);
    let close = after.find("```")?;
    Some(after[..close].trim())
}

/// Walks `sub` (which must begin with `{` or `[`) tracking nested-bracket
/// depth and string-literal state, and returns the prefix ending where depth
/// first returns to zero.
fn balanced_prefix(sub: &str) -> Option<&str> {
    let open_char = sub.chars().next()?;
    let close_char = match open_char {
        '{' => '}',
        '[' => ']',
        _ => return None,
    };

    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape = false;

    for (i, ch) in sub.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        if ch == '\\' {
            escape = true;
            continue;
        }
        if ch == '"' {
            in_string = !in_string;
            continue;
        }
        if in_string {
            continue;
        }

        if ch == open_char {
            depth += 1;
        } else if ch == close_char {
            depth -= 1;
        }

        if depth == 0 {
            return Some(&sub[..i + ch.len_utf8()]);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_json_parses_directly() {
        let value = extract_json(r#"{"a": 1, "b": [2, 3]}"#).unwrap();
        assert_eq!(value, json!({"a": 1, "b": [2, 3]}));
    }

    #[test]
    fn stringified_value_round_trips() {
        let original = json!({
            "title": "Find Your Blend",
            "questions": [{"text": "Morning or evening?", "options": []}]
        });
        let recovered = extract_json(&serde_json::to_string(&original).unwrap()).unwrap();
        assert_eq!(recovered, original);
    }

    #[test]
    fn fenced_block_with_commentary_is_recovered() {
        let raw = "Sure, here you go:\n```json\n{\"a\":1}\n```";
        assert_eq!(extract_json(raw).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn fenced_block_without_language_tag_is_recovered() {
        let raw = "Result:\n```\n[1, 2, 3]\n```\nHope that helps!";
        assert_eq!(extract_json(raw).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn json_embedded_in_prose_is_recovered() {
        let raw = "Here is the object you asked for: {\"ok\": true} — anything else?";
        assert_eq!(extract_json(raw).unwrap(), json!({"ok": true}));
    }

    #[test]
    fn array_before_object_wins_when_it_comes_first() {
        let raw = "prefix [1, 2] and later {\"x\": 1}";
        assert_eq!(extract_json(raw).unwrap(), json!([1, 2]));
    }

    #[test]
    fn braces_inside_string_literals_do_not_confuse_the_scan() {
        let raw = "note: {\"text\": \"use {curly} braces\", \"n\": 1} trailing";
        assert_eq!(
            extract_json(raw).unwrap(),
            json!({"text": "use {curly} braces", "n": 1})
        );
    }

    #[test]
    fn escaped_quotes_inside_strings_are_respected() {
        let raw = r#"answer {"quote": "she said \"hi\"", "depth": {"x": 1}} done"#;
        assert_eq!(
            extract_json(raw).unwrap(),
            json!({"quote": "she said \"hi\"", "depth": {"x": 1}})
        );
    }

    #[test]
    fn text_without_brackets_reports_nothing_found() {
        assert_eq!(
            extract_json("I could not produce any output, sorry."),
            Err(ExtractError::NoJsonFound)
        );
    }

    #[test]
    fn unbalanced_json_reports_unparseable() {
        assert_eq!(
            extract_json("here: {\"a\": [1, 2,"),
            Err(ExtractError::Unparseable)
        );
    }
}
