use std::fmt;
use std::io;

use tracing::{debug, trace, warn};

use crate::error::PromptError;
use crate::io::{EchoControl, LineInput, LineOutput, NoEcho, StdinInput, WriterOutput};
use crate::options::PromptOptions;
use crate::shell::SttyEcho;

/// Prompt/response driver over injected ports.
#[derive(Debug)]
pub struct Prompter<I, O, E = NoEcho> {
    input: I,
    output: O,
    echo: E,
    options: PromptOptions,
}

/// Prompter wired to the process terminal.
pub type StdioPrompter = Prompter<StdinInput, WriterOutput<io::Stdout>, SttyEcho>;

impl<I: LineInput, O: LineOutput> Prompter<I, O, NoEcho> {
    pub fn new(input: I, output: O) -> Self {
        Self {
            input,
            output,
            echo: NoEcho,
            options: PromptOptions::default(),
        }
    }
}

impl StdioPrompter {
    /// Standard input and output, with echo toggled through `stty`.
    pub fn stdio() -> Self {
        Prompter::new(StdinInput, WriterOutput::stdout()).with_echo(SttyEcho::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Echo {
    Visible,
    Hidden,
}

impl<I, O, E> Prompter<I, O, E>
where
    I: LineInput,
    O: LineOutput,
    E: EchoControl,
{
    pub fn with_echo<E2: EchoControl>(self, echo: E2) -> Prompter<I, O, E2> {
        Prompter {
            input: self.input,
            output: self.output,
            echo,
            options: self.options,
        }
    }

    pub fn with_options(mut self, options: PromptOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &PromptOptions {
        &self.options
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn echo(&self) -> &E {
        &self.echo
    }

    pub fn into_parts(self) -> (I, O, E) {
        (self.input, self.output, self.echo)
    }

    /// Writes `text` without a trailing newline and flushes.
    pub fn write(&mut self, text: &str) -> Result<(), PromptError> {
        self.output.write(text)?;
        self.output.flush()?;
        Ok(())
    }

    pub fn write_line(&mut self, text: &str) -> Result<(), PromptError> {
        self.output.write_line(text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Shows `prompt` (if any) and returns the next input line, trimmed.
    pub fn read(&mut self, prompt: &str) -> Result<String, PromptError> {
        if !prompt.is_empty() {
            self.write(prompt)?;
        }
        self.next_line()
    }

    /// Like [`read`](Self::read) with terminal echo suppressed for the read.
    ///
    /// Echo is restored on every exit path, and a newline is written after
    /// the read since the user's own newline was not echoed.
    pub fn read_hidden(&mut self, prompt: &str) -> Result<String, PromptError> {
        if !prompt.is_empty() {
            self.write(prompt)?;
        }
        let line = {
            let _guard = EchoGuard::new(&mut self.echo);
            read_trimmed(&mut self.input, self.options.max_line_length)
        };
        self.write_line("")?;
        line
    }

    fn next_line(&mut self) -> Result<String, PromptError> {
        read_trimmed(&mut self.input, self.options.max_line_length)
    }

    /// Re-prompts until `accept` takes the line, honouring the attempt cap.
    pub(crate) fn read_until<T, R>(
        &mut self,
        prompt: &str,
        echo: Echo,
        mut accept: impl FnMut(&str) -> Result<T, R>,
    ) -> Result<T, PromptError>
    where
        R: fmt::Display,
    {
        let mut failures = 0usize;
        loop {
            let line = match echo {
                Echo::Visible => self.read(prompt)?,
                Echo::Hidden => self.read_hidden(prompt)?,
            };
            let reason = match accept(&line) {
                Ok(value) => return Ok(value),
                Err(reason) => reason,
            };
            failures += 1;
            debug!(prompt, %reason, attempt = failures, "answer rejected");
            if let Some(limit) = self.options.max_attempts
                && failures >= limit.get()
            {
                return Err(PromptError::AttemptsExhausted {
                    prompt: prompt.trim_end_matches([':', ' ']).to_string(),
                    attempts: failures,
                });
            }
            if self.options.explain_rejections {
                self.write_line(&reason.to_string())?;
            }
        }
    }
}

fn read_trimmed(input: &mut impl LineInput, max_len: usize) -> Result<String, PromptError> {
    match input.read_line(max_len)? {
        Some(line) => {
            trace!(length = line.len(), "line read");
            Ok(line.trim().to_string())
        }
        None => Err(PromptError::InputClosed),
    }
}

/// Turns echo off for its lifetime.
struct EchoGuard<'a, E: EchoControl> {
    echo: &'a mut E,
}

impl<'a, E: EchoControl> EchoGuard<'a, E> {
    fn new(echo: &'a mut E) -> Self {
        if let Err(err) = echo.suppress_echo() {
            warn!(error = %err, "could not hide terminal input");
        }
        Self { echo }
    }
}

impl<E: EchoControl> Drop for EchoGuard<'_, E> {
    fn drop(&mut self) {
        if let Err(err) = self.echo.restore_echo() {
            warn!(error = %err, "could not restore terminal echo");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CapturedOutput, RecordingEcho, ScriptedInput};

    fn prompter(lines: &[&str]) -> Prompter<ScriptedInput, CapturedOutput> {
        Prompter::new(ScriptedInput::new(lines.iter().copied()), CapturedOutput::new())
    }

    #[test]
    fn read_writes_prompt_and_trims() {
        let mut prompter = prompter(&["  Ada  "]);
        assert_eq!(prompter.read("Name: ").unwrap(), "Ada");
        assert_eq!(prompter.output().contents(), "Name: ");
    }

    #[test]
    fn read_without_prompt_writes_nothing() {
        let mut prompter = prompter(&["x"]);
        prompter.read("").unwrap();
        assert_eq!(prompter.output().contents(), "");
    }

    #[test]
    fn read_reports_closed_input() {
        let mut prompter = prompter(&[]);
        assert!(matches!(prompter.read("? "), Err(PromptError::InputClosed)));
    }

    #[test]
    fn read_truncates_to_configured_length() {
        let mut prompter =
            prompter(&["abcdef"]).with_options(PromptOptions::default().with_max_line_length(3));
        assert_eq!(prompter.read("").unwrap(), "abc");
    }

    #[test]
    fn read_hidden_toggles_echo_and_ends_line() {
        let mut prompter = prompter(&["s3cret"]).with_echo(RecordingEcho::new());
        assert_eq!(prompter.read_hidden("Password: ").unwrap(), "s3cret");
        assert_eq!(prompter.echo().suppressed, 1);
        assert_eq!(prompter.echo().restored, 1);
        assert_eq!(prompter.output().contents(), "Password: \n");
    }

    #[test]
    fn read_hidden_restores_echo_when_input_closes() {
        let mut prompter = prompter(&[]).with_echo(RecordingEcho::new());
        assert!(prompter.read_hidden("Password: ").is_err());
        assert!(!prompter.echo().is_muted());
    }

    #[test]
    fn echo_failures_do_not_abort_hidden_reads() {
        let mut prompter = prompter(&["pw"]).with_echo(RecordingEcho::failing());
        assert_eq!(prompter.read_hidden("").unwrap(), "pw");
    }

    #[test]
    fn read_until_explains_rejections_when_asked() {
        let mut prompter =
            prompter(&["1", "2"]).with_options(PromptOptions::default().with_explanations(true));
        let value = prompter
            .read_until("n: ", Echo::Visible, |line| {
                if line == "2" { Ok(2) } else { Err("want 2") }
            })
            .unwrap();
        assert_eq!(value, 2);
        assert_eq!(prompter.output().contents(), "n: want 2\nn: ");
    }

    #[test]
    fn read_until_stops_at_attempt_cap() {
        let mut prompter =
            prompter(&["a", "b", "c"]).with_options(PromptOptions::default().with_max_attempts(2));
        let err = prompter
            .read_until("Value: ", Echo::Visible, |_| Err::<(), _>("never"))
            .unwrap_err();
        match err {
            PromptError::AttemptsExhausted { prompt, attempts } => {
                assert_eq!(prompt, "Value");
                assert_eq!(attempts, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(prompter.input().remaining(), 1);
    }
}
