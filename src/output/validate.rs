//! Outline document contract checks.
//!
//! A conforming document has a string `title`, an `outline` array of
//! `{level, text, page}` objects with level H1/H2/H3, non-blank text and a
//! positive integer page, no repeated (level, text, page) triple, and no
//! top-level keys beyond the title, the outline and the debug keys.

use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Top-level keys a valid outline document may carry.
pub const ALLOWED_KEYS: [&str; 4] = ["title", "outline", "_debug_candidates", "_debug_first_lines"];

const LEVELS: [&str; 3] = ["H1", "H2", "H3"];

/// Validate a parsed outline document.
pub fn validate_outline_value(value: &Value) -> Result<()> {
    let obj = value
        .as_object()
        .ok_or_else(|| Error::document_level("document is not a JSON object"))?;

    match obj.get("title") {
        Some(Value::String(_)) => {}
        _ => return Err(Error::document_level("missing or invalid 'title'")),
    }

    let outline = match obj.get("outline") {
        Some(Value::Array(items)) => items,
        _ => return Err(Error::document_level("missing or invalid 'outline' list")),
    };

    let mut seen = HashSet::new();
    for (index, item) in outline.iter().enumerate() {
        let invalid = |reason: String| Error::Validation { index, reason };

        let item = item
            .as_object()
            .ok_or_else(|| invalid("not an object".to_string()))?;

        let level = item.get("level").and_then(Value::as_str).unwrap_or_default();
        if !LEVELS.contains(&level) {
            return Err(invalid(format!("invalid level {}", item.get("level").unwrap_or(&Value::Null))));
        }

        let text = match item.get("text").and_then(Value::as_str) {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(invalid("empty text".to_string())),
        };

        let page = match item.get("page").and_then(Value::as_u64) {
            Some(p) if p >= 1 => p,
            _ => return Err(invalid("invalid page".to_string())),
        };

        if !seen.insert((level, text, page)) {
            return Err(invalid(format!("duplicate entry ({}, {:?}, {})", level, text, page)));
        }
    }

    let extraneous: Vec<&str> = obj
        .keys()
        .map(String::as_str)
        .filter(|k| !ALLOWED_KEYS.contains(k))
        .collect();
    if !extraneous.is_empty() {
        return Err(Error::document_level(format!("unexpected keys present: {:?}", extraneous)));
    }

    Ok(())
}

/// Validate an outline document given as JSON text.
pub fn validate_outline_str(json: &str) -> Result<()> {
    let value: Value = serde_json::from_str(json)?;
    validate_outline_value(&value)
}

/// Validate an outline document file.
pub fn validate_outline_file(path: impl AsRef<Path>) -> Result<()> {
    let data = std::fs::read_to_string(path)?;
    validate_outline_str(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reason(err: Error) -> String {
        match err {
            Error::Validation { reason, .. } => reason,
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_valid_document() {
        let doc = json!({
            "title": "Report",
            "outline": [
                {"level": "H1", "text": "Intro", "page": 1},
                {"level": "H2", "text": "Scope", "page": 1}
            ]
        });
        assert!(validate_outline_value(&doc).is_ok());
    }

    #[test]
    fn test_debug_keys_allowed() {
        let doc = json!({"title": "", "outline": [], "_debug_candidates": [], "_debug_first_lines": []});
        assert!(validate_outline_value(&doc).is_ok());
    }

    #[test]
    fn test_missing_title() {
        let err = validate_outline_value(&json!({"outline": []})).unwrap_err();
        assert!(reason(err).contains("title"));
    }

    #[test]
    fn test_invalid_level() {
        let doc = json!({"title": "t", "outline": [{"level": "TITLE", "text": "x", "page": 1}]});
        let err = validate_outline_value(&doc).unwrap_err();
        assert!(matches!(err, Error::Validation { index: 0, .. }));
    }

    #[test]
    fn test_empty_text_and_bad_page() {
        let blank = json!({"title": "t", "outline": [{"level": "H1", "text": "  ", "page": 1}]});
        assert_eq!(reason(validate_outline_value(&blank).unwrap_err()), "empty text");

        for page in [json!(0), json!(-2), json!(1.5), json!("3")] {
            let doc = json!({"title": "t", "outline": [{"level": "H1", "text": "x", "page": page}]});
            assert_eq!(reason(validate_outline_value(&doc).unwrap_err()), "invalid page");
        }
    }

    #[test]
    fn test_duplicate_triple() {
        let doc = json!({
            "title": "t",
            "outline": [
                {"level": "H1", "text": "Intro", "page": 1},
                {"level": "H1", "text": "Intro", "page": 1}
            ]
        });
        let err = validate_outline_value(&doc).unwrap_err();
        assert!(matches!(err, Error::Validation { index: 1, .. }));
    }

    #[test]
    fn test_extraneous_key() {
        let doc = json!({"title": "t", "outline": [], "score": 3});
        assert!(reason(validate_outline_value(&doc).unwrap_err()).contains("score"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(validate_outline_str("{"), Err(Error::Json(_))));
    }
}
