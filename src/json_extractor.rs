//! Pulls a JSON object out of free-form model output.
//!
//! Models routinely wrap the payload in prose or markdown fences, so the text is searched in two
//! passes: a permissive pattern for objects mentioning `recipes`, then a balanced-brace scan.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

static RECIPES_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*?recipes.*?\}").expect("recipes pattern is valid"));

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("No JSON found in response")]
    NoJsonFound,
    #[error("Could not extract valid JSON from response: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub fn extract_json(text: &str) -> Result<Value, ExtractionError> {
    if let Some(value) = first_parsable_pattern_match(text) {
        return Ok(value);
    }
    first_balanced_object(text)
}

fn first_parsable_pattern_match(text: &str) -> Option<Value> {
    RECIPES_OBJECT
        .find_iter(text)
        .find_map(|candidate| serde_json::from_str::<Value>(candidate.as_str()).ok())
}

/// Parses the first balanced top-level `{...}` span. A span that balances but does not parse
/// ends the search.
fn first_balanced_object(text: &str) -> Result<Value, ExtractionError> {
    let mut depth = 0usize;
    let mut start = None;

    for (pos, ch) in text.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    start = Some(pos);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(begin) = start {
                        let candidate = &text[begin..=pos];
                        return serde_json::from_str(candidate).map_err(|e| {
                            tracing::debug!(error = %e, span_len = candidate.len(), "balanced span is not valid JSON");
                            ExtractionError::InvalidJson(e)
                        });
                    }
                }
            }
            _ => {}
        }
    }

    Err(ExtractionError::NoJsonFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_surrounded_by_prose() {
        let text = "here is your data: {\"recipes\":[{\"id\":\"a\"}]} thanks";
        let value = extract_json(text).unwrap();
        assert_eq!(value, json!({"recipes": [{"id": "a"}]}));
    }

    #[test]
    fn test_no_braces_is_no_json_found() {
        let err = extract_json("sorry, I cannot help with that").unwrap_err();
        assert!(matches!(err, ExtractionError::NoJsonFound));
        assert_eq!(err.to_string(), "No JSON found in response");
    }

    #[test]
    fn test_flat_pattern_match_wins_before_bracket_scan() {
        let text = "{not json} and then {\"recipes\": \"none\"}";
        // The pattern's first lazy match spans from the first brace and fails; the second
        // candidate never starts, so the bracket scan runs and stops on the invalid first span.
        assert!(matches!(extract_json(text), Err(ExtractionError::InvalidJson(_))));

        let text = "prefix {\"recipes\": 3} suffix {\"other\": 1}";
        assert_eq!(extract_json(text).unwrap(), json!({"recipes": 3}));
    }

    #[test]
    fn test_markdown_fenced_payload() {
        let text = "```json\n{\n  \"recipes\": [\n    {\"name\": \"Dal Tadka\", \"steps\": [\"Boil\"]}\n  ]\n}\n```";
        let value = extract_json(text).unwrap();
        assert_eq!(value["recipes"][0]["name"], "Dal Tadka");
    }

    #[test]
    fn test_balanced_scan_stops_at_first_invalid_span() {
        let text = "{broken: yes} {\"valid\": true}";
        assert!(matches!(extract_json(text), Err(ExtractionError::InvalidJson(_))));
    }

    #[test]
    fn test_balanced_scan_finds_object_without_recipes_key() {
        let text = "Plan follows: {\"plans\": [{\"planName\": \"A\"}]} enjoy";
        let value = extract_json(text).unwrap();
        assert_eq!(value["plans"][0]["planName"], "A");
    }

    #[test]
    fn test_stray_closing_brace_before_object_is_skipped() {
        assert_eq!(extract_json("} {\"a\": 1}").unwrap(), json!({"a": 1}));
        assert_eq!(extract_json("}} trailing {\"plans\": []} }").unwrap(), json!({"plans": []}));
    }

    #[test]
    fn test_unbalanced_braces_are_no_json_found() {
        assert!(matches!(extract_json("} {\"a\": 1"), Err(ExtractionError::NoJsonFound)));
    }
}
