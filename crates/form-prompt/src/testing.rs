//! Scripted ports for driving a [`Prompter`](crate::Prompter) without a terminal.

use std::collections::VecDeque;
use std::io;

use crate::io::{EchoControl, LineInput, LineOutput};

/// Replays a fixed sequence of lines, then reports end of input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    consumed: usize,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            consumed: 0,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    /// Lines handed out so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineInput for ScriptedInput {
    fn read_line(&mut self, max_len: usize) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front().map(|line| {
            self.consumed += 1;
            line.chars().take(max_len).collect()
        }))
    }
}

/// Collects everything written to it.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    buffer: String,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> &str {
        &self.buffer
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.buffer.lines()
    }
}

impl LineOutput for CapturedOutput {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.buffer.push_str(text);
        Ok(())
    }
}

/// Records echo toggling; optionally fails every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingEcho {
    pub suppressed: usize,
    pub restored: usize,
    fail: bool,
}

impl RecordingEcho {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Whether echo is currently off.
    pub fn is_muted(&self) -> bool {
        self.suppressed > self.restored
    }

    fn outcome(&self) -> io::Result<()> {
        if self.fail {
            Err(io::Error::other("echo control unavailable"))
        } else {
            Ok(())
        }
    }
}

impl EchoControl for RecordingEcho {
    fn suppress_echo(&mut self) -> io::Result<()> {
        self.suppressed += 1;
        self.outcome()
    }

    fn restore_echo(&mut self) -> io::Result<()> {
        self.restored += 1;
        self.outcome()
    }
}
