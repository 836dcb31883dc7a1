use serde_json::{Value, json};

use form_spec::{
    Cardinality, Entry, FieldKind, FormDefinition, FormSpec, result_schema, validate,
};

fn example_form() -> FormSpec {
    let definition: FormDefinition =
        serde_json::from_str(include_str!("fixtures/example_form.json")).expect("deserialize");
    FormSpec::try_from(definition).expect("valid form")
}

fn complete_answers() -> Value {
    json!({
        "firstname": "Mary",
        "lastname": "Smith",
        "likesflowers": true,
        "pets": null,
        "friends": ["Henry"],
        "parents": ["Mary", "Peter"],
        "colleagues": ["Ann", "Bob", "Cid"],
        "password": "hunter2",
        "email": "Mary.Smith@example.org"
    })
}

#[test]
fn fixture_normalizes_every_cardinality() {
    let spec = example_form();
    let kind = |key: &str| spec.field(key).expect("field").kind.clone();
    assert_eq!(kind("pets"), FieldKind::List(Cardinality::Optional));
    assert_eq!(kind("friends"), FieldKind::List(Cardinality::RequireNonEmpty));
    assert_eq!(kind("parents"), FieldKind::List(Cardinality::ExactCount(2)));
    assert_eq!(
        kind("colleagues"),
        FieldKind::List(Cardinality::Range {
            min: Some(2),
            max: Some(99)
        })
    );
    let labels = spec
        .entries()
        .iter()
        .filter(|entry| matches!(entry, Entry::Label(_)))
        .count();
    assert_eq!(labels, 4);
}

#[test]
fn complete_answers_are_valid() {
    let report = validate(&example_form(), &complete_answers());
    assert!(report.valid, "{:?}", report);
}

#[test]
fn validation_reports_missing_and_unknown() {
    let mut answers = complete_answers();
    let map = answers.as_object_mut().unwrap();
    map.remove("lastname");
    map.insert("nickname".into(), json!("M"));

    let report = validate(&example_form(), &answers);
    assert!(!report.valid);
    assert_eq!(report.missing_required, vec!["lastname"]);
    assert_eq!(report.unknown_fields, vec!["nickname"]);
}

#[test]
fn validation_applies_field_rules() {
    let mut answers = complete_answers();
    answers["parents"] = json!(["Mary"]);
    answers["email"] = json!("not-an-email");
    answers["likesflowers"] = json!("yes");
    answers["firstname"] = json!("   ");

    let report = validate(&example_form(), &answers);
    let codes = report
        .errors
        .iter()
        .map(|error| (error.key.as_str(), error.code.as_str()))
        .collect::<Vec<_>>();
    assert!(codes.contains(&("parents", "cardinality")));
    assert!(codes.contains(&("email", "pattern_mismatch")));
    assert!(codes.contains(&("likesflowers", "type_mismatch")));
    assert!(codes.contains(&("firstname", "empty")));
}

#[test]
fn untrimmed_list_items_are_rejected() {
    let mut answers = complete_answers();
    answers["friends"] = json!([" Henry"]);
    let report = validate(&example_form(), &answers);
    assert_eq!(report.errors[0].code, "invalid_item");
}

#[test]
fn result_schema_lists_every_field() {
    let schema = result_schema(&example_form());
    assert_eq!(schema["title"], "Example shell form");
    let props = schema["properties"].as_object().expect("properties");
    assert_eq!(props.len(), 9);
    assert_eq!(props["parents"]["minItems"], 2);
    assert_eq!(props["parents"]["maxItems"], 2);
    assert_eq!(props["likesflowers"]["type"], "boolean");
    assert_eq!(props["password"]["writeOnly"], true);
    assert!(props["email"].get("pattern").is_none());
    let required = schema["required"].as_array().expect("required");
    assert!(required.iter().any(|key| key == "email"));
}

#[test]
fn result_schema_patterns_are_anchored_like_the_engine() {
    let spec = FormSpec::builder()
        .regex("year", "Year", "[0-9]+")
        .build()
        .expect("valid form");
    let schema = result_schema(&spec);
    let pattern = schema["properties"]["year"]["pattern"]
        .as_str()
        .expect("pattern");
    assert_eq!(pattern, "^(?:[0-9]+)$");

    let search = regex::Regex::new(pattern).expect("schema pattern compiles");
    for candidate in ["2024", "year 2024", "2024a", ""] {
        let engine_valid = validate(&spec, &json!({ "year": candidate })).valid;
        assert_eq!(search.is_match(candidate), engine_valid, "{candidate:?}");
    }
}
