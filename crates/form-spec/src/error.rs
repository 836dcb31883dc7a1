use thiserror::Error;

use crate::pattern::PatternError;

/// Problems detected while building a [`FormSpec`](crate::FormSpec).
///
/// Every variant is raised before the first prompt is written, so a form
/// that builds successfully can always be prompted.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("entry {index} must define either a key or a label")]
    MissingKey { index: usize },
    #[error("field key cannot be empty (entry {index})")]
    EmptyKey { index: usize },
    #[error("duplicate field key '{0}'")]
    DuplicateKey(String),
    #[error("field '{key}' has an invalid pattern: {source}")]
    InvalidPattern {
        key: String,
        #[source]
        source: PatternError,
    },
    #[error("field '{key}' has an invalid cardinality: {reason}")]
    InvalidCardinality { key: String, reason: String },
    #[error("regex field '{0}' must define a pattern")]
    MissingPattern(String),
    #[error("entry '{entry}' ({kind}) does not accept the '{attribute}' attribute")]
    UnexpectedAttribute {
        entry: String,
        kind: &'static str,
        attribute: &'static str,
    },
}
