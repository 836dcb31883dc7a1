use crate::cardinality::Cardinality;
use crate::pattern::FieldPattern;

/// Input handling for a single data field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free text; must not be empty.
    Text,
    /// Yes/no question answered through a confirmation prompt.
    Checkbox,
    /// Free text read with terminal echo suppressed; must not be empty.
    Password,
    /// Comma separated values with an item count constraint.
    List(Cardinality),
    /// Free text that must fully match the pattern.
    Regex(FieldPattern),
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Password => "password",
            FieldKind::List(_) => "list",
            FieldKind::Regex(_) => "regex",
        }
    }
}

/// A named value collected from the user.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub key: String,
    pub prompt: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn is_secret(&self) -> bool {
        matches!(self.kind, FieldKind::Password)
    }
}
