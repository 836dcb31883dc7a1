use thiserror::Error;

use form_spec::SpecError;

/// Fatal prompting failures. Invalid answers are not errors; they re-prompt.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("input closed before a value was supplied")]
    InputClosed,
    #[error("no valid answer for '{prompt}' after {attempts} attempts")]
    AttemptsExhausted { prompt: String, attempts: usize },
    #[error("a confirmation needs at least one answer")]
    NoChoices,
    #[error("invalid form: {0}")]
    Spec(#[from] SpecError),
}
