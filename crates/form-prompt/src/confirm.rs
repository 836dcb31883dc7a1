use form_spec::Rejection;

use crate::error::PromptError;
use crate::io::{EchoControl, LineInput, LineOutput};
use crate::prompter::{Echo, Prompter};

/// Ordered answer labels for [`Prompter::confirm`].
///
/// Labels are stored lower-cased. Inserting a label that is already present
/// replaces its value but keeps its original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choices<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for Choices<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Choices<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, label: &str, value: T) -> Self {
        self.insert(label, value);
        self
    }

    pub fn insert(&mut self, label: &str, value: T) {
        let label = label.to_lowercase();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&T> {
        let label = label.to_lowercase();
        self.entries
            .iter()
            .find(|(existing, _)| *existing == label)
            .map(|(_, value)| value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn first(&self) -> Option<&T> {
        self.entries.first().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `a/b/c`, with the first label upper-cased when it is the default.
    pub fn hint(&self, first_is_default: bool) -> String {
        self.labels()
            .enumerate()
            .map(|(index, label)| {
                if index == 0 && first_is_default {
                    label.to_uppercase()
                } else {
                    label.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl Choices<bool> {
    /// `y` for true, `n` for false.
    pub fn yes_no() -> Self {
        Self::new().with("y", true).with("n", false)
    }
}

impl<S: AsRef<str>, T> FromIterator<(S, T)> for Choices<T> {
    fn from_iter<It: IntoIterator<Item = (S, T)>>(iter: It) -> Self {
        let mut choices = Self::new();
        for (label, value) in iter {
            choices.insert(label.as_ref(), value);
        }
        choices
    }
}

impl<I, O, E> Prompter<I, O, E>
where
    I: LineInput,
    O: LineOutput,
    E: EchoControl,
{
    /// Asks `question` until the reply names one of `choices`.
    ///
    /// Replies are matched case-insensitively. With `first_is_default` an
    /// empty reply picks the first choice.
    pub fn confirm<T: Clone>(
        &mut self,
        question: &str,
        choices: &Choices<T>,
        first_is_default: bool,
    ) -> Result<T, PromptError> {
        let default = match (choices.first(), first_is_default) {
            (None, _) => return Err(PromptError::NoChoices),
            (Some(first), true) => Some(first),
            (Some(_), false) => None,
        };
        let prompt = format!("{} [{}]: ", question, choices.hint(first_is_default));
        self.read_until(&prompt, Echo::Visible, |line| {
            if line.is_empty()
                && let Some(default) = default
            {
                return Ok(default.clone());
            }
            choices
                .get(line)
                .cloned()
                .ok_or_else(|| Rejection::UnknownChoice {
                    choices: choices.labels().map(String::from).collect(),
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CapturedOutput, ScriptedInput};

    fn prompter(lines: &[&str]) -> Prompter<ScriptedInput, CapturedOutput> {
        Prompter::new(ScriptedInput::new(lines.iter().copied()), CapturedOutput::new())
    }

    #[test]
    fn empty_reply_takes_the_default() {
        let mut prompter = prompter(&[""]);
        assert!(prompter.confirm("Continue?", &Choices::yes_no(), true).unwrap());
        assert_eq!(prompter.output().contents(), "Continue? [Y/n]: ");
    }

    #[test]
    fn replies_are_case_insensitive() {
        let mut prompter = prompter(&["N"]);
        assert!(!prompter.confirm("Continue?", &Choices::yes_no(), true).unwrap());
    }

    #[test]
    fn unknown_replies_are_asked_again() {
        let mut prompter = prompter(&["maybe", "", "b"]);
        let choices = Choices::new().with("A", 1).with("b", 2);
        assert_eq!(prompter.confirm("Pick", &choices, false).unwrap(), 2);
        assert_eq!(prompter.input().consumed(), 3);
        assert_eq!(
            prompter.output().contents(),
            "Pick [a/b]: Pick [a/b]: Pick [a/b]: "
        );
    }

    #[test]
    fn duplicate_labels_keep_position_and_last_value() {
        let choices: Choices<u8> = [("Y", 1), ("n", 2), ("y", 3)].into_iter().collect();
        assert_eq!(choices.len(), 2);
        assert_eq!(choices.hint(true), "Y/n");
        assert_eq!(choices.get("y"), Some(&3));
    }

    #[test]
    fn empty_choices_fail_before_prompting() {
        let mut prompter = prompter(&["y"]);
        let err = prompter
            .confirm("Anything?", &Choices::<bool>::new(), true)
            .unwrap_err();
        assert!(matches!(err, PromptError::NoChoices));
        assert_eq!(prompter.output().contents(), "");
    }
}
