use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::spec::field::{FieldKind, FieldSpec};
use crate::spec::form::FormSpec;

/// A single field failing its acceptance rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub key: String,
    pub path: String,
    pub message: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub missing_required: Vec<String>,
    pub unknown_fields: Vec<String>,
}

/// Checks answers (as produced by a form run) against the form.
pub fn validate(spec: &FormSpec, answers: &Value) -> ValidationReport {
    let answers_map = answers.as_object().cloned().unwrap_or_default();

    let mut errors = Vec::new();
    let mut missing_required = Vec::new();

    for field in spec.fields() {
        match answers_map.get(&field.key) {
            None => missing_required.push(field.key.clone()),
            Some(value) => {
                if let Some(error) = validate_value(field, value) {
                    errors.push(error);
                }
            }
        }
    }

    let keys: BTreeSet<&str> = spec.fields().map(|field| field.key.as_str()).collect();
    let unknown_fields: Vec<String> = answers_map
        .keys()
        .filter(|key| !keys.contains(key.as_str()))
        .cloned()
        .collect();

    ValidationReport {
        valid: errors.is_empty() && missing_required.is_empty() && unknown_fields.is_empty(),
        errors,
        missing_required,
        unknown_fields,
    }
}

fn validate_value(field: &FieldSpec, value: &Value) -> Option<ValidationError> {
    match &field.kind {
        FieldKind::Text | FieldKind::Password => match value.as_str() {
            None => Some(type_mismatch(field, "string")),
            Some(text) if text.trim().is_empty() => {
                Some(base_error(field, "value cannot be empty", "empty"))
            }
            Some(_) => None,
        },
        FieldKind::Checkbox => {
            if value.is_boolean() {
                None
            } else {
                Some(type_mismatch(field, "boolean"))
            }
        }
        FieldKind::Regex(pattern) => match value.as_str() {
            None => Some(type_mismatch(field, "string")),
            Some(text) if !pattern.is_full_match(text) => Some(base_error(
                field,
                &format!("value does not match {}", pattern.as_str()),
                "pattern_mismatch",
            )),
            Some(_) => None,
        },
        FieldKind::List(cardinality) => {
            let count = match value {
                Value::Null => 0,
                Value::Array(items) => {
                    let valid_items = items.iter().all(|item| {
                        item.as_str()
                            .is_some_and(|text| !text.is_empty() && text.trim() == text)
                    });
                    if !valid_items {
                        return Some(base_error(
                            field,
                            "list items must be trimmed, non-empty strings",
                            "invalid_item",
                        ));
                    }
                    items.len()
                }
                _ => return Some(type_mismatch(field, "array or null")),
            };
            if cardinality.accepts(count) {
                None
            } else {
                Some(base_error(
                    field,
                    &format!("expected {}, got {}", cardinality, count),
                    "cardinality",
                ))
            }
        }
    }
}

fn type_mismatch(field: &FieldSpec, expected: &str) -> ValidationError {
    base_error(
        field,
        &format!("type mismatch: expected {}", expected),
        "type_mismatch",
    )
}

fn base_error(field: &FieldSpec, message: &str, code: &str) -> ValidationError {
    ValidationError {
        key: field.key.clone(),
        path: format!("/{}", field.key),
        message: message.into(),
        code: code.into(),
    }
}
