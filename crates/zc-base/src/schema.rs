//! Validation boundary for provider responses.
//!
//! The model answers with a JSON array of
//! `{name, type, status, reason, children?}` objects. Anything that does not
//! match is rejected whole; nothing is coerced or partially kept.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::tree::{Decision, EntryKind, FileEntry};

/// Why a provider response was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("response is not a JSON array")]
    NotAnArray,

    #[error("{path}: entry is not an object")]
    NotAnObject { path: String },

    #[error("{path}: missing field `{field}`")]
    MissingField { path: String, field: &'static str },

    #[error("{path}: field `{field}` is empty")]
    EmptyField { path: String, field: &'static str },

    #[error("{path}: invalid `{field}` value {value}")]
    InvalidValue { path: String, field: &'static str, value: String },

    #[error("{path}: name `{name}` is not a single path segment")]
    InvalidName { path: String, name: String },

    #[error("{path}: file `{name}` carries children")]
    FileWithChildren { path: String, name: String },
}

/// Parse and validate a raw response body.
pub fn parse_entries(text: &str) -> Result<Vec<FileEntry>, SchemaError> {
    let value: Value = serde_json::from_str(text.trim()).map_err(|e| SchemaError::InvalidJson(e.to_string()))?;
    entries_from_value(&value)
}

/// Validate an already-decoded response value.
pub fn entries_from_value(value: &Value) -> Result<Vec<FileEntry>, SchemaError> {
    let Value::Array(items) = value else {
        return Err(SchemaError::NotAnArray);
    };
    parse_list(items, "")
}

fn parse_list(items: &[Value], parent: &str) -> Result<Vec<FileEntry>, SchemaError> {
    items.iter().enumerate().map(|(i, item)| parse_entry(item, &format!("{}[{}]", parent, i))).collect()
}

fn parse_entry(value: &Value, path: &str) -> Result<FileEntry, SchemaError> {
    let obj = value.as_object().ok_or_else(|| SchemaError::NotAnObject { path: path.to_string() })?;

    let name = required_str(obj, "name", path)?;
    if name.contains('/') || name.contains('\\') {
        return Err(SchemaError::InvalidName { path: path.to_string(), name: name.to_string() });
    }

    let status = required_str(obj, "status", path)?;
    let decision = Decision::parse(status).ok_or_else(|| SchemaError::InvalidValue {
        path: path.to_string(),
        field: "status",
        value: format!("\"{}\"", status),
    })?;

    let rationale = required_str(obj, "reason", path)?;

    let children = match obj.get("children") {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(items.as_slice()),
        Some(other) => {
            return Err(SchemaError::InvalidValue {
                path: path.to_string(),
                field: "children",
                value: other.to_string(),
            });
        }
    };

    let kind = match required_str(obj, "type", path)? {
        "file" => {
            if children.is_some_and(|c| !c.is_empty()) {
                return Err(SchemaError::FileWithChildren { path: path.to_string(), name: name.to_string() });
            }
            EntryKind::File
        }
        "folder" => {
            let children = match children {
                Some(items) => parse_list(items, &format!("{}.children", path))?,
                None => Vec::new(),
            };
            EntryKind::Folder { children }
        }
        other => {
            return Err(SchemaError::InvalidValue {
                path: path.to_string(),
                field: "type",
                value: format!("\"{}\"", other),
            });
        }
    };

    Ok(FileEntry { name: name.to_string(), decision, rationale: rationale.to_string(), kind })
}

/// Fetch a required, non-blank string field.
fn required_str<'a>(obj: &'a Map<String, Value>, field: &'static str, path: &str) -> Result<&'a str, SchemaError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(SchemaError::MissingField { path: path.to_string(), field }),
        Some(Value::String(s)) if s.trim().is_empty() => Err(SchemaError::EmptyField { path: path.to_string(), field }),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(SchemaError::InvalidValue { path: path.to_string(), field, value: other.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::count_stats;

    #[test]
    fn test_parses_nested_tree() {
        let body = r#"[
            {"name": "package.json", "type": "file", "status": "keep", "reason": "Core manifest."},
            {"name": "src", "type": "folder", "status": "keep", "reason": "App source.", "children": [
                {"name": "App.tsx", "type": "file", "status": "keep", "reason": "Root component."},
                {"name": "old", "type": "folder", "status": "delete", "reason": "Unused drafts."}
            ]},
            {"name": "dist", "type": "folder", "status": "delete", "reason": "Build output.", "children": null}
        ]"#;
        let entries = parse_entries(body).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].children().len(), 2);
        assert!(entries[1].children()[1].is_folder());
        assert!(entries[1].children()[1].children().is_empty());
        assert!(entries[2].children().is_empty());

        let stats = count_stats(&entries);
        assert_eq!(stats.keep, 3);
        assert_eq!(stats.delete, 2);
    }

    #[test]
    fn test_rejects_non_array() {
        assert_eq!(parse_entries(r#"{"name": "a"}"#), Err(SchemaError::NotAnArray));
        assert_eq!(parse_entries("42"), Err(SchemaError::NotAnArray));
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(parse_entries("```json\n[]\n```"), Err(SchemaError::InvalidJson(_))));
    }

    #[test]
    fn test_rejects_missing_reason_in_nested_entry() {
        let body = r#"[{"name": "src", "type": "folder", "status": "keep", "reason": "r", "children": [
            {"name": "a.ts", "type": "file", "status": "keep"}
        ]}]"#;
        let err = parse_entries(body).unwrap_err();
        assert_eq!(err, SchemaError::MissingField { path: "[0].children[0]".into(), field: "reason" });
        assert_eq!(err.to_string(), "[0].children[0]: missing field `reason`");
    }

    #[test]
    fn test_rejects_missing_status() {
        let err = parse_entries(r#"[{"name": "a", "type": "file", "reason": "r"}]"#).unwrap_err();
        assert_eq!(err, SchemaError::MissingField { path: "[0]".into(), field: "status" });
    }

    #[test]
    fn test_rejects_unknown_enum_values() {
        let err = parse_entries(r#"[{"name": "a", "type": "link", "status": "keep", "reason": "r"}]"#).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidValue { field: "type", .. }));

        let err = parse_entries(r#"[{"name": "a", "type": "file", "status": "maybe", "reason": "r"}]"#).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidValue { field: "status", .. }));
    }

    #[test]
    fn test_rejects_blank_name_and_paths() {
        let err = parse_entries(r#"[{"name": "  ", "type": "file", "status": "keep", "reason": "r"}]"#).unwrap_err();
        assert_eq!(err, SchemaError::EmptyField { path: "[0]".into(), field: "name" });

        let err = parse_entries(r#"[{"name": "src/a.ts", "type": "file", "status": "keep", "reason": "r"}]"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidName { .. }));
    }

    #[test]
    fn test_rejects_file_with_children() {
        let body = r#"[{"name": "a.ts", "type": "file", "status": "keep", "reason": "r", "children": [
            {"name": "b.ts", "type": "file", "status": "keep", "reason": "r"}
        ]}]"#;
        assert!(matches!(parse_entries(body), Err(SchemaError::FileWithChildren { .. })));
    }

    #[test]
    fn test_file_with_empty_children_is_tolerated() {
        let body = r#"[{"name": "a.ts", "type": "file", "status": "keep", "reason": "r", "children": []}]"#;
        let entries = parse_entries(body).unwrap();
        assert_eq!(entries[0].kind, EntryKind::File);
    }

    #[test]
    fn test_rejects_non_string_field() {
        let err = parse_entries(r#"[{"name": 7, "type": "file", "status": "keep", "reason": "r"}]"#).unwrap_err();
        assert_eq!(err, SchemaError::InvalidValue { path: "[0]".into(), field: "name", value: "7".into() });
    }

    #[test]
    fn test_ignores_unknown_fields() {
        let body = r#"[{"name": "a", "type": "file", "status": "keep", "reason": "r", "size": 12}]"#;
        assert_eq!(parse_entries(body).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert_eq!(parse_entries("[]").unwrap(), Vec::new());
    }
}
