use form_spec::{Entry, FieldKind, FieldSpec, FieldValue, FormResult, FormSpec};
use tracing::debug;

use crate::confirm::Choices;
use crate::error::PromptError;
use crate::io::{EchoControl, LineInput, LineOutput};
use crate::prompter::{Echo, Prompter};

impl<I, O, E> Prompter<I, O, E>
where
    I: LineInput,
    O: LineOutput,
    E: EchoControl,
{
    /// Walks the form in order and returns once every field holds an
    /// accepted value. Labels are printed as headings and produce no key.
    pub fn read_form(&mut self, spec: &FormSpec) -> Result<FormResult, PromptError> {
        let mut result = FormResult::new();
        for entry in spec.entries() {
            match entry {
                Entry::Label(text) => self.heading(text)?,
                Entry::Field(field) => {
                    let value = self.read_field(field)?;
                    result.insert(field.key.clone(), value);
                }
            }
        }
        debug!(fields = result.len(), "form complete");
        Ok(result)
    }

    /// Prints `text` underlined with one `=` per character.
    pub fn heading(&mut self, text: &str) -> Result<(), PromptError> {
        let underline = "=".repeat(text.chars().count());
        self.write_line(&format!("\n{}\n{}", text, underline))
    }

    /// Prompts for a single field until its acceptance rule passes.
    pub fn read_field(&mut self, field: &FieldSpec) -> Result<FieldValue, PromptError> {
        let prompt = match field.kind {
            FieldKind::Checkbox => format!(
                "{} [{}]: ",
                field.prompt,
                Choices::<bool>::yes_no().hint(true)
            ),
            _ => format!("{}: ", field.prompt),
        };
        let echo = if field.is_secret() {
            Echo::Hidden
        } else {
            Echo::Visible
        };
        self.read_until(&prompt, echo, |line| field.accept(line))
    }
}
