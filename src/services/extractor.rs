//! Extraction of a JSON object from free-form model text.
//!
//! Models asked for "strict JSON" still wrap the payload in prose or code
//! fences often enough that a bare `serde_json` parse is not sufficient.
//! After a direct parse attempt, the text is scanned for balanced brace
//! spans, tracking string literals and escapes so that braces inside
//! strings do not confuse the match. Each balanced span is tried in order
//! of appearance until one parses as an object.

use serde_json::{Map, Value};
use thiserror::Error;

/// Failure to locate a JSON object in the model output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("no JSON object found in model output")]
    NoJsonFound,
}

/// Pull the first parseable JSON object out of `raw`.
pub fn extract(raw: &str) -> Result<Map<String, Value>, ExtractionError> {
    let text = raw.trim();

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        return Ok(map);
    }

    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        match balanced_span(&text[start..]) {
            Some(len) => {
                let candidate = &text[start..start + len];
                if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(candidate) {
                    return Ok(map);
                }
                // Balanced but not valid JSON: resume after the opening brace
                // so nested objects inside the span still get a chance.
                search_from = start + 1;
            }
            // Unclosed span: a later opening brace may still close.
            None => search_from = start + 1,
        }
    }

    Err(ExtractionError::NoJsonFound)
}

/// Length of the balanced `{...}` span at the start of `text`, respecting
/// string literals and backslash escapes. `None` if the braces never close.
fn balanced_span(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + ch.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_parse() {
        let map = extract(r#"{"schedule":[],"reasoning":[]}"#).unwrap();
        assert!(map.contains_key("schedule"));
    }

    #[test]
    fn test_embedded_in_prose() {
        let map =
            extract(r#"Here is your plan: {"schedule":[],"reasoning":[]} thanks"#).unwrap();
        assert!(map.contains_key("schedule"));
        assert!(map.contains_key("reasoning"));
    }

    #[test]
    fn test_no_braces_fails() {
        assert_eq!(
            extract("I could not produce a schedule today."),
            Err(ExtractionError::NoJsonFound)
        );
    }

    #[test]
    fn test_braces_inside_string_values() {
        let map = extract(r#"note: {"schedule":[],"reasoning":["use {deep} focus"]} end"#)
            .unwrap();
        let reasoning = map.get("reasoning").unwrap().as_array().unwrap();
        assert_eq!(reasoning[0].as_str().unwrap(), "use {deep} focus");
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let map = extract(r#"{"reasoning":["say \"hi\" {now}"]}"#).unwrap();
        assert!(map.contains_key("reasoning"));
    }

    #[test]
    fn test_stray_brace_before_object() {
        let map = extract(r#"weird { prefix then {"schedule":[1]}"#).unwrap();
        assert!(map.contains_key("schedule"));
    }

    #[test]
    fn test_markdown_fenced_payload() {
        let text = "```json\n{\"schedule\":[],\"reasoning\":[]}\n```";
        assert!(extract(text).is_ok());
    }

    #[test]
    fn test_unclosed_brace_fails() {
        assert_eq!(
            extract(r#"{"schedule": ["#),
            Err(ExtractionError::NoJsonFound)
        );
    }

    #[test]
    fn test_non_object_json_fails() {
        assert_eq!(extract("[1, 2, 3]"), Err(ExtractionError::NoJsonFound));
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(extract(""), Err(ExtractionError::NoJsonFound));
    }
}
