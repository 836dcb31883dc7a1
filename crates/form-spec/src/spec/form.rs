use crate::cardinality::{Cardinality, CardinalityInput};
use crate::error::SpecError;
use crate::spec::definition::{EntryInput, FormDefinition, InputKind};
use crate::spec::field::FieldSpec;

/// One position in a form.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// Section heading; collects nothing.
    Label(String),
    Field(FieldSpec),
}

/// Validated, immutable form layout.
///
/// Built through [`FormBuilder`] or `FormSpec::try_from(FormDefinition)`;
/// both reject duplicate keys, malformed cardinalities and bad patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSpec {
    title: Option<String>,
    entries: Vec<Entry>,
}

impl FormSpec {
    pub fn builder() -> FormBuilder {
        FormBuilder::default()
    }

    pub(crate) fn from_entries(title: Option<String>, entries: Vec<Entry>) -> Self {
        Self { title, entries }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Field(field) => Some(field),
            Entry::Label(_) => None,
        })
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields().find(|field| field.key == key)
    }
}

/// Fluent construction of a [`FormSpec`].
///
/// ```
/// use form_spec::{Cardinality, FormSpec};
///
/// let spec = FormSpec::builder()
///     .label("Some more data")
///     .checkbox("likesflowers", "Did you like flowers?")
///     .list("parents", "Names of your mom and dad", Cardinality::ExactCount(2))
///     .build()
///     .unwrap();
/// assert_eq!(spec.fields().count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    definition: FormDefinition,
}

impl FormBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.definition.title = Some(title.into());
        self
    }

    pub fn label(mut self, text: impl Into<String>) -> Self {
        self.definition.entries.push(EntryInput::label(text));
        self
    }

    pub fn text(self, key: impl Into<String>, prompt: impl Into<String>) -> Self {
        self.field(EntryInput::field(key, InputKind::Text, prompt))
    }

    pub fn checkbox(self, key: impl Into<String>, prompt: impl Into<String>) -> Self {
        self.field(EntryInput::field(key, InputKind::Checkbox, prompt))
    }

    pub fn password(self, key: impl Into<String>, prompt: impl Into<String>) -> Self {
        self.field(EntryInput::field(key, InputKind::Password, prompt))
    }

    pub fn list(
        self,
        key: impl Into<String>,
        prompt: impl Into<String>,
        cardinality: Cardinality,
    ) -> Self {
        let mut entry = EntryInput::field(key, InputKind::List, prompt);
        entry.cardinality = Some(CardinalityInput::from(cardinality));
        self.field(entry)
    }

    pub fn regex(
        self,
        key: impl Into<String>,
        prompt: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        let mut entry = EntryInput::field(key, InputKind::Regex, prompt);
        entry.pattern = Some(pattern.into());
        self.field(entry)
    }

    fn field(mut self, entry: EntryInput) -> Self {
        self.definition.entries.push(entry);
        self
    }

    pub fn build(self) -> Result<FormSpec, SpecError> {
        FormSpec::try_from(self.definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::field::FieldKind;

    #[test]
    fn builder_keeps_declared_order() {
        let spec = FormSpec::builder()
            .title("Example")
            .label("Personal data")
            .text("firstname", "Firstname")
            .password("password", "Some password goes here")
            .regex("email", "E-Mail address", "/^[a-z]+@[a-z]+\\.[a-z]+$/i")
            .build()
            .unwrap();

        assert_eq!(spec.title(), Some("Example"));
        let keys = spec
            .fields()
            .map(|field| field.key.as_str())
            .collect::<Vec<_>>();
        assert_eq!(keys, ["firstname", "password", "email"]);
        assert!(spec.field("password").unwrap().is_secret());
        assert!(matches!(
            spec.field("email").unwrap().kind,
            FieldKind::Regex(_)
        ));
    }

    #[test]
    fn builder_normalizes_cardinality() {
        let spec = FormSpec::builder()
            .list(
                "pair",
                "Pair",
                Cardinality::Range {
                    min: Some(2),
                    max: Some(2),
                },
            )
            .build()
            .unwrap();
        assert_eq!(
            spec.field("pair").unwrap().kind,
            FieldKind::List(Cardinality::ExactCount(2))
        );
    }

    #[test]
    fn builder_rejects_inverted_ranges() {
        let err = FormSpec::builder()
            .list(
                "friends",
                "Friends",
                Cardinality::Range {
                    min: Some(3),
                    max: Some(1),
                },
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, SpecError::InvalidCardinality { key, .. } if key == "friends"));
    }

    #[test]
    fn builder_rejects_empty_keys() {
        let err = FormSpec::builder().text("  ", "Blank").build().unwrap_err();
        assert!(matches!(err, SpecError::EmptyKey { index: 0 }));
    }
}
