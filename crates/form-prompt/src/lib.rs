//! Prompting helpers for line-oriented terminal programs.
//!
//! The [`Prompter`] owns the input/output ports it talks to, so the same code
//! drives a real terminal or a scripted test double.

pub mod confirm;
pub mod error;
pub mod form;
pub mod io;
pub mod options;
pub mod prompter;
pub mod shell;
pub mod testing;

pub use confirm::Choices;
pub use error::PromptError;
pub use io::{EchoControl, LineInput, LineOutput, NoEcho, ReaderInput, StdinInput, WriterOutput};
pub use options::PromptOptions;
pub use prompter::{Prompter, StdioPrompter};
pub use shell::{Shell, ShellError, SttyEcho};
pub use testing::{CapturedOutput, RecordingEcho, ScriptedInput};

pub use form_spec;
