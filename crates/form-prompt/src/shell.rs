//! Thin wrappers over the operating system used around prompts: running
//! commands, toggling terminal echo, deleting paths, downloading files and
//! clearing the screen.

use std::ffi::OsString;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

use crate::io::EchoControl;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("refusing to delete '{}'", .0.display())]
    InsecurePath(PathBuf),
    #[error("'{command}' failed with {}", describe_code(.code))]
    CommandFailed { command: String, code: Option<i32> },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}

/// Runs commands through a POSIX shell.
#[derive(Debug, Clone)]
pub struct Shell {
    interpreter: PathBuf,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new("sh")
    }
}

impl Shell {
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    fn command(&self, line: &str) -> Command {
        let mut command = Command::new(&self.interpreter);
        command.arg("-c").arg(line);
        command
    }

    /// Runs `line` and returns its standard output, trimmed.
    pub fn exec(&self, line: &str) -> Result<String, ShellError> {
        debug!(command = line, "exec");
        let output = self
            .command(line)
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit())
            .output()?;
        if !output.status.success() {
            return Err(ShellError::CommandFailed {
                command: line.to_string(),
                code: output.status.code(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Runs `line` attached to the current terminal.
    pub fn run(&self, line: &str) -> Result<(), ShellError> {
        debug!(command = line, "run");
        let mut command = self.command(line);
        run_inherited(&mut command, line)
    }

    pub fn mute_echo(&self) -> Result<(), ShellError> {
        stty("-echo")
    }

    pub fn unmute_echo(&self) -> Result<(), ShellError> {
        stty("echo")
    }

    /// Removes a file or directory. The empty path and the filesystem root
    /// are always refused.
    pub fn delete(&self, path: &Path, recursive: bool) -> Result<(), ShellError> {
        if path.as_os_str().is_empty() || path == Path::new("/") {
            return Err(ShellError::InsecurePath(path.to_path_buf()));
        }
        debug!(path = %path.display(), recursive, "delete");
        let metadata = fs::symlink_metadata(path)?;
        if !metadata.is_dir() {
            fs::remove_file(path)?;
        } else if recursive {
            fs::remove_dir_all(path)?;
        } else {
            fs::remove_dir(path)?;
        }
        Ok(())
    }

    /// Fetches `url` into `target` with `wget`.
    pub fn download(&self, url: &str, target: &Path) -> Result<(), ShellError> {
        let mut document = OsString::from("--output-document=");
        document.push(target.as_os_str());
        let mut command = Command::new("wget");
        command.arg("--quiet").arg(document).arg(url);
        debug!(url, target = %target.display(), "download");
        run_inherited(&mut command, &format!("wget {}", url))
    }

    pub fn clear(&self) -> Result<(), ShellError> {
        let mut command = Command::new("clear");
        run_inherited(&mut command, "clear")
    }
}

fn run_inherited(command: &mut Command, label: &str) -> Result<(), ShellError> {
    let status = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;
    if status.success() {
        Ok(())
    } else {
        Err(ShellError::CommandFailed {
            command: label.to_string(),
            code: status.code(),
        })
    }
}

fn stty(setting: &str) -> Result<(), ShellError> {
    let mut command = Command::new("stty");
    command.arg(setting);
    run_inherited(&mut command, &format!("stty {}", setting))
}

/// Echo control through `stty`. Does nothing when standard input is not a
/// terminal, so piped input works unchanged.
#[derive(Debug, Clone, Default)]
pub struct SttyEcho {
    shell: Shell,
}

impl SttyEcho {
    fn active(&self) -> bool {
        io::stdin().is_terminal()
    }
}

impl EchoControl for SttyEcho {
    fn suppress_echo(&mut self) -> io::Result<()> {
        if !self.active() {
            return Ok(());
        }
        self.shell.mute_echo().map_err(into_io)
    }

    fn restore_echo(&mut self) -> io::Result<()> {
        if !self.active() {
            return Ok(());
        }
        self.shell.unmute_echo().map_err(into_io)
    }
}

fn into_io(err: ShellError) -> io::Error {
    match err {
        ShellError::Io(err) => err,
        other => io::Error::other(other),
    }
}
