pub mod definition;
pub mod field;
pub mod form;

pub use definition::{EntryInput, FormDefinition, InputKind, definition_schema};
pub use field::{FieldKind, FieldSpec};
pub use form::{Entry, FormBuilder, FormSpec};
