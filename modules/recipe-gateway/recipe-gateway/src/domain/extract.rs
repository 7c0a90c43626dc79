//! Best-effort extraction of a JSON payload from free-form model output.
//!
//! Models wrap answers in Markdown fences, prepend prose, or forget the closing
//! fence. [`extract_json`] tries, in order:
//!
//! 1. the content of the first code fence (or the whole text when there is none),
//! 2. every balanced `{...}` block of that content, left to right,
//! 3. every balanced `{...}` block of the untouched text.
//!
//! Brace matching ignores braces inside JSON string literals.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no JSON object found in model output")]
    NoJson,
    #[error("JSON object in model output does not parse: {0}")]
    Invalid(String),
}

const FENCE: &str = "```";

/// Extract the first parseable JSON value from `text`.
///
/// # Errors
/// [`ExtractError::NoJson`] when no candidate exists, [`ExtractError::Invalid`] when
/// candidates exist but none parse.
pub fn extract_json(text: &str) -> Result<Value, ExtractError> {
    let fenced = strip_code_fences(text);
    if let Ok(value) = serde_json::from_str::<Value>(fenced) {
        return Ok(value);
    }

    let mut last_error = None;
    for source in [fenced, text] {
        for candidate in balanced_objects(source) {
            match serde_json::from_str::<Value>(candidate) {
                Ok(value) => return Ok(value),
                Err(e) => last_error = Some(e.to_string()),
            }
        }
    }

    Err(last_error.map_or(ExtractError::NoJson, ExtractError::Invalid))
}

/// Content of the first Markdown code fence, trimmed.
///
/// The info string (`json`) is dropped. A missing closing fence runs to the end of
/// the text. Without any fence the trimmed input is returned.
pub fn strip_code_fences(text: &str) -> &str {
    let Some(open) = text.find(FENCE) else {
        return text.trim();
    };
    let after = &text[open + FENCE.len()..];
    let info_len = after
        .bytes()
        .take_while(u8::is_ascii_alphanumeric)
        .count();
    let body = &after[info_len..];
    let end = body.find(FENCE).unwrap_or(body.len());
    body[..end].trim()
}

/// Balanced `{...}` blocks, one per opening brace that has a match.
fn balanced_objects(text: &str) -> impl Iterator<Item = &str> {
    text.match_indices('{')
        .filter_map(move |(start, _)| balanced_object_at(text, start))
}

fn balanced_object_at(text: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, b) in text.as_bytes()[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if *b == b'\\' {
                escaped = true;
            } else if *b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn plain_json_parses() {
        assert_eq!(extract_json(r#"{"a":1}"#).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn json_fence_matches_unwrapped() {
        let raw = r#"{"recipe":{"name":"X","steps":["b"]}}"#;
        let fenced = format!("```json\n{raw}\n```");
        assert_eq!(extract_json(&fenced).unwrap(), extract_json(raw).unwrap());
    }

    #[test]
    fn bare_fence_without_info_string() {
        assert_eq!(extract_json("```\n{\"a\":1}\n```").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn prose_before_fence() {
        let text = "Here you go:\n```json\n{\"recipe\":{\"name\":\"X\"}}\n```";
        assert_eq!(extract_json(text).unwrap()["recipe"]["name"], "X");
    }

    #[test]
    fn missing_closing_fence() {
        let text = "```json\n{\"a\": {\"b\": 2}}\n";
        assert_eq!(extract_json(text).unwrap(), json!({"a": {"b": 2}}));
    }

    #[test]
    fn stray_closing_fence_only() {
        let text = "{\"a\": 1}\n```";
        assert_eq!(extract_json(text).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn prose_before_and_after_block() {
        let text = "Claro! Aqui está:\n{\"name\": \"Bolo\", \"steps\": [\"assar\"]}\nBom apetite!";
        assert_eq!(
            extract_json(text).unwrap(),
            json!({"name": "Bolo", "steps": ["assar"]})
        );
    }

    #[test]
    fn braces_inside_string_literals() {
        let text = r#"Result: {"name": "Torta {especial}", "tips": "use } com cuidado"} fim"#;
        let v = extract_json(text).unwrap();
        assert_eq!(v["name"], "Torta {especial}");
        assert_eq!(v["tips"], "use } com cuidado");
    }

    #[test]
    fn escaped_quotes_inside_strings() {
        let text = r#"ok {"name": "Pão \"caseiro\" {1}", "n": 1} done"#;
        assert_eq!(extract_json(text).unwrap()["name"], "Pão \"caseiro\" {1}");
    }

    #[test]
    fn nested_objects_are_kept_whole() {
        let text = r#"x {"a": {"b": {"c": []}}, "d": 1} y {"e": 2}"#;
        assert_eq!(
            extract_json(text).unwrap(),
            json!({"a": {"b": {"c": []}}, "d": 1})
        );
    }

    #[test]
    fn skips_unparseable_leading_braces() {
        let text = r#"Use {placeholders} like this: {"name": "X"}"#;
        assert_eq!(extract_json(text).unwrap(), json!({"name": "X"}));
    }

    #[test]
    fn non_json_text_is_no_json() {
        assert_eq!(
            extract_json("Desculpe, não consegui identificar o prato."),
            Err(ExtractError::NoJson)
        );
    }

    #[test]
    fn unbalanced_object_is_no_json() {
        assert_eq!(extract_json(r#"{"a": [1, 2"#), Err(ExtractError::NoJson));
    }

    #[test]
    fn truncated_outer_object_falls_back_to_inner_block() {
        assert_eq!(extract_json(r#"{"a": {"b": 1}"#).unwrap(), json!({"b": 1}));
    }

    #[test]
    fn balanced_but_invalid_is_invalid() {
        assert!(matches!(
            extract_json("{name: 'X'}"),
            Err(ExtractError::Invalid(_))
        ));
    }

    #[test]
    fn empty_input_is_no_json() {
        assert_eq!(extract_json(""), Err(ExtractError::NoJson));
        assert_eq!(extract_json("```json\n```"), Err(ExtractError::NoJson));
    }

    #[test]
    fn unterminated_string_does_not_panic() {
        assert_eq!(extract_json(r#"{"a": "b}"#), Err(ExtractError::NoJson));
    }

    #[test]
    fn multibyte_text_around_object() {
        let text = "Receita 🍲: {\"name\": \"Moqueca\"} — ótima";
        assert_eq!(extract_json(text).unwrap()["name"], "Moqueca");
    }

    #[test]
    fn strip_code_fences_variants() {
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("```JSON {} ```"), "{}");
        assert_eq!(strip_code_fences("intro ```\n[1]\n``` outro"), "[1]");
    }

    #[test]
    fn balanced_objects_yield_blocks_in_order() {
        let blocks: Vec<&str> = balanced_objects("a {b} {c}").collect();
        assert_eq!(blocks, ["{b}", "{c}"]);
        assert_eq!(balanced_objects("no braces").next(), None);
    }
}
