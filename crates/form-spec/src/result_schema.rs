use serde_json::{Map, Value, json};

use crate::spec::field::{FieldKind, FieldSpec};
use crate::spec::form::FormSpec;

/// JSON schema for the result of running `spec`.
pub fn generate(spec: &FormSpec) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in spec.fields() {
        properties.insert(field.key.clone(), field_schema(field));
        required.push(Value::String(field.key.clone()));
    }

    let mut schema = json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    });
    if let Some(title) = spec.title() {
        schema["title"] = Value::String(title.to_string());
    }
    schema
}

fn field_schema(field: &FieldSpec) -> Value {
    let mut schema = match &field.kind {
        FieldKind::Text => json!({ "type": "string", "minLength": 1 }),
        FieldKind::Password => json!({ "type": "string", "minLength": 1, "writeOnly": true }),
        FieldKind::Checkbox => json!({ "type": "boolean" }),
        FieldKind::Regex(pattern) => {
            let mut schema = json!({ "type": "string" });
            // JSON Schema patterns search; anchor them like the engine does.
            if pattern.flags().is_empty() {
                schema["pattern"] = Value::String(format!("^(?:{})$", pattern.body()));
            }
            schema
        }
        FieldKind::List(cardinality) => {
            let (min, max) = cardinality.bounds();
            let kinds = if min > 0 {
                json!("array")
            } else {
                json!(["array", "null"])
            };
            let mut schema = json!({
                "type": kinds,
                "items": { "type": "string", "minLength": 1 },
            });
            if min > 0 {
                schema["minItems"] = json!(min);
            }
            if let Some(max) = max {
                schema["maxItems"] = json!(max);
            }
            schema
        }
    };
    schema["title"] = Value::String(field.prompt.clone());
    schema
}
