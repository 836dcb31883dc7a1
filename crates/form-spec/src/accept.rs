use std::fmt;

use crate::answers::FieldValue;
use crate::cardinality::Cardinality;
use crate::spec::field::{FieldKind, FieldSpec};

/// Why a line was not accepted for a field. The prompt is simply repeated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    PatternMismatch { pattern: String },
    Cardinality { expected: Cardinality, found: usize },
    UnknownChoice { choices: Vec<String> },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Empty => write!(f, "a value is required"),
            Rejection::PatternMismatch { pattern } => {
                write!(f, "value must match {}", pattern)
            }
            Rejection::Cardinality { expected, found } => {
                write!(f, "expected {}, got {}", expected, found)
            }
            Rejection::UnknownChoice { choices } => {
                write!(f, "answer with one of {}", choices.join("/"))
            }
        }
    }
}

/// Splits a comma separated line into trimmed, non-blank items.
///
/// An empty line is [`FieldValue::Absent`]; a line of separators only yields
/// an empty list.
pub fn split_list(line: &str) -> FieldValue {
    if line.is_empty() {
        return FieldValue::Absent;
    }
    FieldValue::List(
        line.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect(),
    )
}

impl FieldSpec {
    /// Applies the field's acceptance rule to one trimmed input line.
    ///
    /// Checkbox lines follow the default yes/no confirmation: `y`, `n`, or an
    /// empty line for yes.
    pub fn accept(&self, line: &str) -> Result<FieldValue, Rejection> {
        match &self.kind {
            FieldKind::Text | FieldKind::Password => {
                if line.is_empty() {
                    Err(Rejection::Empty)
                } else {
                    Ok(FieldValue::Text(line.to_string()))
                }
            }
            FieldKind::Checkbox => match line.to_lowercase().as_str() {
                "" | "y" => Ok(FieldValue::Flag(true)),
                "n" => Ok(FieldValue::Flag(false)),
                _ => Err(Rejection::UnknownChoice {
                    choices: vec!["y".into(), "n".into()],
                }),
            },
            FieldKind::List(cardinality) => {
                let value = split_list(line);
                let found = value.as_list().map(<[String]>::len).unwrap_or(0);
                if cardinality.accepts(found) {
                    Ok(value)
                } else {
                    Err(Rejection::Cardinality {
                        expected: *cardinality,
                        found,
                    })
                }
            }
            FieldKind::Regex(pattern) => {
                if pattern.is_full_match(line) {
                    Ok(FieldValue::Text(line.to_string()))
                } else {
                    Err(Rejection::PatternMismatch {
                        pattern: pattern.as_str().to_string(),
                    })
                }
            }
        }
    }
}
