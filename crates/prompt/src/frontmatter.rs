//! Front matter splitting for prompt files.
//!
//! A header is a YAML block fenced by lines of three or more dashes at the
//! very top of the file:
//!
//! ```text
//! ---
//! workflow: cv_enhancer
//! version: v1
//! ---
//! You are a careful resume editor...
//! ```

use crate::types::PromptMetadata;
use promptreg_core::{AppError, AppResult};
use serde_yaml::{Mapping, Value};

/// Split `text` into header metadata and body.
///
/// Text without a complete fenced header is returned whole as the body with
/// empty metadata. The body is trimmed in both cases.
pub fn split_front_matter(text: &str) -> AppResult<(PromptMetadata, String)> {
    let text = text.trim_start_matches('\u{feff}').trim();

    let Some((header, body)) = find_header(text) else {
        return Ok((PromptMetadata::default(), text.to_string()));
    };

    let metadata = parse_header(header)?;
    Ok((metadata, body.trim().to_string()))
}

/// Locate the fenced header, returning `(yaml, rest)`.
fn find_header(text: &str) -> Option<(&str, &str)> {
    let (first, mut rest) = text.split_once('\n').unwrap_or((text, ""));
    if !is_fence(first) {
        return None;
    }

    let header_start = text.len() - rest.len();
    let mut offset = header_start;
    loop {
        let (line, next) = match rest.split_once('\n') {
            Some((line, next)) => (line, next),
            None if rest.is_empty() => return None,
            None => (rest, ""),
        };

        if is_fence(line) {
            return Some((&text[header_start..offset], next));
        }

        offset += line.len() + 1;
        rest = next;
        if rest.is_empty() {
            return None;
        }
    }
}

fn is_fence(line: &str) -> bool {
    let line = line.trim_end();
    line.len() >= 3 && line.bytes().all(|b| b == b'-')
}

fn parse_header(yaml: &str) -> AppResult<PromptMetadata> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml)
        .map_err(|e| AppError::Prompt(format!("Invalid header YAML: {}", e)))?;

    match normalize(value) {
        Value::Null => Ok(PromptMetadata::default()),
        value @ Value::Mapping(_) => serde_yaml::from_value(value)
            .map_err(|e| AppError::Prompt(format!("Invalid header metadata: {}", e))),
        // Prose between two dash rules is not metadata
        _ => {
            tracing::debug!("Header block is not a mapping; treating it as empty metadata");
            Ok(PromptMetadata::default())
        }
    }
}

/// Stringify scalar mapping keys and drop YAML tags, recursively.
///
/// Keys that are lists or mappings cannot be named and are skipped.
fn normalize(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => {
            let mut normalized = Mapping::with_capacity(mapping.len());
            for (key, value) in mapping {
                match key_string(&key) {
                    Some(key) => {
                        normalized.insert(Value::String(key), normalize(value));
                    }
                    None => tracing::warn!("Skipping non-scalar header key {:?}", key),
                }
            }
            Value::Mapping(normalized)
        }
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(normalize).collect()),
        Value::Tagged(tagged) => normalize(tagged.value),
        scalar => scalar,
    }
}

fn key_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Tagged(tagged) => key_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MetadataValue;

    #[test]
    fn test_split_with_header() {
        let text = "---\nworkflow: demo\nversion: v2\n---\n\nHello there.\n";
        let (meta, body) = split_front_matter(text).unwrap();
        assert_eq!(meta.workflow.as_deref(), Some("demo"));
        assert_eq!(meta.version.as_deref(), Some("v2"));
        assert_eq!(body, "Hello there.");
    }

    #[test]
    fn test_no_header() {
        let (meta, body) = split_front_matter("  Just a prompt.\n# heading\n").unwrap();
        assert_eq!(meta, PromptMetadata::default());
        assert_eq!(body, "Just a prompt.\n# heading");
    }

    #[test]
    fn test_unclosed_fence_is_body() {
        let text = "---\nworkflow: demo\nno closing fence";
        let (meta, body) = split_front_matter(text).unwrap();
        assert_eq!(meta.workflow, None);
        assert_eq!(body, text);
    }

    #[test]
    fn test_empty_header() {
        let (meta, body) = split_front_matter("---\n---\nBody").unwrap();
        assert_eq!(meta, PromptMetadata::default());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_crlf_and_long_fences() {
        let text = "-----\r\nworkflow: demo\r\n-----  \r\nBody\r\n";
        let (meta, body) = split_front_matter(text).unwrap();
        assert_eq!(meta.workflow.as_deref(), Some("demo"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_header_at_end_of_file() {
        let (meta, body) = split_front_matter("---\nworkflow: demo\n---").unwrap();
        assert_eq!(meta.workflow.as_deref(), Some("demo"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let result = split_front_matter("---\nworkflow: [unclosed\n---\nBody");
        assert!(matches!(result, Err(AppError::Prompt(_))));
    }

    #[test]
    fn test_non_mapping_header_is_empty_metadata() {
        let text = "---\nSection one of the prompt\n---\nBody";
        let (meta, body) = split_front_matter(text).unwrap();
        assert_eq!(meta, PromptMetadata::default());
        assert_eq!(body, "Body");

        let (meta, _) = split_front_matter("---\n- a\n- b\n---\nBody").unwrap();
        assert_eq!(meta, PromptMetadata::default());
    }

    #[test]
    fn test_scalar_keys_are_stringified() {
        let text = "---\nworkflow: w\n2024: launch\ntrue: x\n~: nothing\n---\nBody";
        let (meta, _) = split_front_matter(text).unwrap();
        assert_eq!(meta.workflow.as_deref(), Some("w"));
        assert_eq!(
            meta.extra.get("2024"),
            Some(&MetadataValue::String("launch".to_string()))
        );
        assert_eq!(
            meta.extra.get("true"),
            Some(&MetadataValue::String("x".to_string()))
        );
        assert!(meta.extra.contains_key("null"));
    }

    #[test]
    fn test_nested_keys_and_tags_are_normalized() {
        let text = "---\nlimits:\n  1: low\n  2: high\nnote: !custom hello\n---\nBody";
        let (meta, _) = split_front_matter(text).unwrap();

        let MetadataValue::Map(limits) = &meta.extra["limits"] else {
            panic!("expected a mapping, got {:?}", meta.extra["limits"]);
        };
        assert_eq!(limits.get("1"), Some(&MetadataValue::String("low".to_string())));
        assert_eq!(
            meta.extra.get("note"),
            Some(&MetadataValue::String("hello".to_string()))
        );
        assert_eq!(meta.extra.len(), 2);
    }
}
