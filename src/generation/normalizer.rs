// ABOUTME: Extracts a JSON value from raw completion text
// ABOUTME: Strips fences and commentary, removes trailing commas, best-effort quote repair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Response Normalizer
//!
//! Model output is only approximately compliant with the formatting rules in
//! the prompt. Normalization tries progressively more invasive repairs and
//! re-parses after each one:
//!
//! 1. trim and parse directly
//! 2. strip markdown code fences
//! 3. extract each top-level balanced `[...]` / `{...}` span
//! 4. remove trailing commas before `]` / `}`
//! 5. escape double quotes embedded inside string values
//!
//! Step 5 is a heuristic and can damage legitimate text, so its output is
//! only used if it parses.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::GenerationError;

/// Fenced block, optionally tagged `json`; group 1 is the body
static CODE_FENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json|JSON)?[ \t]*\r?\n?(.*?)```").ok());

/// Extract the JSON payload from raw completion text
///
/// # Errors
///
/// Returns [`GenerationError::Normalization`] if no repair yields valid JSON
pub fn normalize(raw: &str) -> Result<Value, GenerationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GenerationError::Normalization(
            "completion text is empty".to_owned(),
        ));
    }

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    let unfenced = strip_code_fences(trimmed);
    if let Ok(value) = serde_json::from_str(unfenced) {
        debug!("Parsed completion after stripping code fences");
        return Ok(value);
    }

    let spans = top_level_spans(unfenced);
    if spans.is_empty() {
        return Err(GenerationError::Normalization(
            "no balanced JSON array or object found".to_owned(),
        ));
    }

    for span in &spans {
        if let Ok(value) = serde_json::from_str(span) {
            return Ok(value);
        }
        let without_commas = remove_trailing_commas(span);
        if let Ok(value) = serde_json::from_str(&without_commas) {
            debug!("Parsed completion after removing trailing commas");
            return Ok(value);
        }
        let requoted = escape_embedded_quotes(&without_commas);
        if let Ok(value) = serde_json::from_str(&requoted) {
            debug!("Parsed completion after quote repair");
            return Ok(value);
        }
    }

    Err(GenerationError::Normalization(format!(
        "{} candidate span(s) found but none parsed as JSON",
        spans.len()
    )))
}

/// Remove a surrounding ```` ```json ```` / ```` ``` ```` fence if present
fn strip_code_fences(text: &str) -> &str {
    CODE_FENCE
        .as_ref()
        .and_then(|re| re.captures(text))
        .and_then(|c| c.get(1))
        .map_or(text, |inner| inner.as_str().trim())
}

/// Top-level balanced `[...]` or `{...}` spans, in order of appearance
///
/// Brackets inside string literals are ignored. An opener that never closes
/// is skipped and scanning resumes right after it.
fn top_level_spans(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut offset = 0;

    while let Some(rel_start) = text[offset..].find(['[', '{']) {
        let start = offset + rel_start;
        match balanced_end(&text[start..]) {
            Some(len) => {
                spans.push(&text[start..start + len]);
                offset = start + len;
            }
            None => offset = start + 1,
        }
    }
    spans
}

/// Byte length of the balanced span opening at the first character
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx + ch.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

/// Drop commas that are followed only by whitespace and a closing bracket
fn remove_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (idx, &ch) in chars.iter().enumerate() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            out.push(ch);
            continue;
        }
        if ch == '"' {
            in_string = true;
        } else if ch == ',' {
            let next = chars[idx + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some(']' | '}')) {
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// Escape quotes that neither open nor close a JSON string
///
/// A structural opening quote follows `{ [ , :` and a structural closing
/// quote precedes `, : } ]` (ignoring whitespace). Any other quote seen
/// while inside a string is treated as embedded text.
fn escape_embedded_quotes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 16);
    let mut in_string = false;
    let mut escaped = false;

    for (idx, &ch) in chars.iter().enumerate() {
        if !in_string {
            if ch == '"' {
                in_string = true;
            }
            out.push(ch);
            continue;
        }
        if escaped {
            escaped = false;
            out.push(ch);
            continue;
        }
        match ch {
            '\\' => {
                escaped = true;
                out.push(ch);
            }
            '"' => {
                let next = chars[idx + 1..].iter().find(|c| !c.is_whitespace());
                let closes = matches!(next, None | Some(',' | ':' | '}' | ']'));
                if closes {
                    in_string = false;
                    out.push('"');
                } else {
                    out.push_str("\\\"");
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_json_unchanged() {
        let raw = r#"  {"name": "Leg Day", "exercises": [{"sets": 3}]}  "#;
        let expected: Value = serde_json::from_str(raw.trim()).unwrap();
        assert_eq!(normalize(raw).unwrap(), expected);
    }

    #[test]
    fn test_trailing_comma_repaired() {
        assert_eq!(normalize(r#"{"a":1,}"#).unwrap(), json!({"a": 1}));
        assert_eq!(normalize("[1, 2, 3 ,\n]").unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_trailing_comma_inside_string_kept() {
        let out = remove_trailing_commas(r#"{"a": "x,}", "b": [1,],}"#);
        assert_eq!(out, r#"{"a": "x,}", "b": [1]}"#);
    }

    #[test]
    fn test_fence_pattern_compiles() {
        assert!(CODE_FENCE.is_some());
    }

    #[test]
    fn test_fenced_array_extracted() {
        let raw = "```json\n[{\"name\":\"X\",\"calories\":200}]\n```";
        assert_eq!(
            normalize(raw).unwrap(),
            json!([{"name": "X", "calories": 200}])
        );
    }

    #[test]
    fn test_bare_fence_and_commentary() {
        let raw = "Here you go!\n```\n{\"a\": [1, 2,]}\n```\nEnjoy.";
        assert_eq!(normalize(raw).unwrap(), json!({"a": [1, 2]}));
    }

    #[test]
    fn test_commentary_around_object() {
        let raw = "Sure, here is the workout: {\"name\": \"Push [Upper] {A}\"} Hope it helps";
        assert_eq!(normalize(raw).unwrap(), json!({"name": "Push [Upper] {A}"}));
    }

    #[test]
    fn test_unclosed_bracket_in_commentary_skipped() {
        let raw = "(see [1 for notes): [{\"a\":1}]";
        assert_eq!(normalize(raw).unwrap(), json!([{"a": 1}]));
        assert_eq!(top_level_spans("{ oops [1] {2"), vec!["[1]"]);
    }

    #[test]
    fn test_embedded_quotes_repaired() {
        let raw = r#"{"description": "Heat the "pan" and add oil", "step": 1}"#;
        assert_eq!(
            normalize(raw).unwrap(),
            json!({"description": "Heat the \"pan\" and add oil", "step": 1})
        );
    }

    #[test]
    fn test_unrecoverable_text_fails() {
        for raw in ["", "   ", "I cannot help with that.", "{\"name\": \"cut off"] {
            assert!(matches!(
                normalize(raw),
                Err(GenerationError::Normalization(_))
            ));
        }
    }
}
