use std::collections::HashSet;
use std::fmt;

use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cardinality::CardinalityInput;
use crate::error::SpecError;
use crate::pattern::FieldPattern;
use crate::spec::field::{FieldKind, FieldSpec};
use crate::spec::form::{Entry, FormSpec};

/// Field types accepted in a form definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Checkbox,
    Password,
    List,
    Regex,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Checkbox => "checkbox",
            InputKind::Password => "password",
            InputKind::List => "list",
            InputKind::Regex => "regex",
        }
    }
}

/// One entry of a form definition.
///
/// Entries without a `key` are section headings and must carry a `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EntryInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: InputKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Prompt text; defaults to the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<CardinalityInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl EntryInput {
    pub fn label(text: impl Into<String>) -> Self {
        Self {
            key: None,
            kind: InputKind::Text,
            label: Some(text.into()),
            prompt: None,
            cardinality: None,
            pattern: None,
        }
    }

    pub fn field(key: impl Into<String>, kind: InputKind, prompt: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            kind,
            label: None,
            prompt: Some(prompt.into()),
            cardinality: None,
            pattern: None,
        }
    }

    fn name(&self, index: usize) -> String {
        self.key
            .clone()
            .or_else(|| self.label.clone())
            .unwrap_or_else(|| format!("#{}", index))
    }
}

/// Serialized form layout, as read from JSON files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub entries: Vec<EntryInput>,
}

/// JSON schema describing [`FormDefinition`] documents.
pub fn definition_schema() -> Value {
    schema_for!(FormDefinition).to_value()
}

impl TryFrom<FormDefinition> for FormSpec {
    type Error = SpecError;

    fn try_from(definition: FormDefinition) -> Result<Self, Self::Error> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(definition.entries.len());

        for (index, input) in definition.entries.into_iter().enumerate() {
            let entry = match input.key.as_deref() {
                None => build_label(index, input)?,
                Some(key) => {
                    let key = key.trim();
                    if key.is_empty() {
                        return Err(SpecError::EmptyKey { index });
                    }
                    if !seen.insert(key.to_string()) {
                        return Err(SpecError::DuplicateKey(key.to_string()));
                    }
                    Entry::Field(build_field(index, key, &input)?)
                }
            };
            entries.push(entry);
        }

        Ok(FormSpec::from_entries(definition.title, entries))
    }
}

fn build_label(index: usize, input: EntryInput) -> Result<Entry, SpecError> {
    let unexpected = |attribute| SpecError::UnexpectedAttribute {
        entry: input.name(index),
        kind: "label",
        attribute,
    };
    if input.kind != InputKind::Text {
        return Err(unexpected("type"));
    }
    if input.cardinality.is_some() {
        return Err(unexpected("cardinality"));
    }
    if input.pattern.is_some() {
        return Err(unexpected("pattern"));
    }
    match input.label.or(input.prompt) {
        Some(text) => Ok(Entry::Label(text)),
        None => Err(SpecError::MissingKey { index }),
    }
}

fn build_field(index: usize, key: &str, input: &EntryInput) -> Result<FieldSpec, SpecError> {
    let unexpected = |attribute| SpecError::UnexpectedAttribute {
        entry: input.name(index),
        kind: input.kind.as_str(),
        attribute,
    };
    if input.label.is_some() {
        return Err(unexpected("label"));
    }
    if input.cardinality.is_some() && input.kind != InputKind::List {
        return Err(unexpected("cardinality"));
    }
    if input.pattern.is_some() && input.kind != InputKind::Regex {
        return Err(unexpected("pattern"));
    }

    let kind = match input.kind {
        InputKind::Text => FieldKind::Text,
        InputKind::Checkbox => FieldKind::Checkbox,
        InputKind::Password => FieldKind::Password,
        InputKind::List => {
            let cardinality = input
                .cardinality
                .unwrap_or_default()
                .normalize()
                .map_err(|reason| SpecError::InvalidCardinality {
                    key: key.to_string(),
                    reason,
                })?;
            FieldKind::List(cardinality)
        }
        InputKind::Regex => {
            let literal = input
                .pattern
                .as_deref()
                .ok_or_else(|| SpecError::MissingPattern(key.to_string()))?;
            let pattern =
                FieldPattern::parse(literal).map_err(|source| SpecError::InvalidPattern {
                    key: key.to_string(),
                    source,
                })?;
            FieldKind::Regex(pattern)
        }
    };

    Ok(FieldSpec {
        key: key.to_string(),
        prompt: input.prompt.clone().unwrap_or_else(|| key.to_string()),
        kind,
    })
}
