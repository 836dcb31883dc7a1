#![allow(missing_docs)]

pub mod accept;
pub mod answers;
pub mod cardinality;
pub mod error;
pub mod pattern;
pub mod result_schema;
pub mod spec;
pub mod validate;

pub use accept::{Rejection, split_list};
pub use answers::{FieldValue, FormResult};
pub use cardinality::{Bound, Cardinality, CardinalityInput};
pub use error::SpecError;
pub use pattern::{FieldPattern, PatternError};
pub use result_schema::generate as result_schema;
pub use spec::{
    Entry, EntryInput, FieldKind, FieldSpec, FormBuilder, FormDefinition, FormSpec, InputKind,
    definition_schema,
};
pub use validate::{ValidationError, ValidationReport, validate};
