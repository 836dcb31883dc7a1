use std::num::NonZeroUsize;

pub const DEFAULT_MAX_LINE_LENGTH: usize = 2048;

/// Tunables shared by every prompt issued through a [`Prompter`](crate::Prompter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptOptions {
    /// Characters kept from a single input line.
    pub max_line_length: usize,
    /// Attempts allowed per value; `None` re-prompts forever.
    pub max_attempts: Option<NonZeroUsize>,
    /// Print the reason after a rejected answer.
    pub explain_rejections: bool,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            max_attempts: None,
            explain_rejections: false,
        }
    }
}

impl PromptOptions {
    pub fn with_max_line_length(mut self, length: usize) -> Self {
        self.max_line_length = length.max(1);
        self
    }

    /// Caps attempts per value; `0` removes the cap.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = NonZeroUsize::new(attempts);
        self
    }

    pub fn with_explanations(mut self, explain: bool) -> Self {
        self.explain_rejections = explain;
        self
    }
}
