//! Process execution abstractions and types
//!
//! This module provides the core abstractions for launching local processes. Everything the
//! library runs on the operator's machine (the automation backend, `PATH` probes) goes through
//! the [`CommandRunner`] port so that tests can substitute a mock.

use std::{borrow::Cow, fmt, path::PathBuf, process::Output, sync::Arc, time::Duration};

use async_trait::async_trait;
use thiserror::Error;

/// A program plus its argument vector
///
/// Arguments are handed to the OS as-is; no shell ever interprets them, so values containing
/// spaces or quotes need no escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,

    /// Whether the child may read from the operator's terminal (password prompts)
    interactive: bool,
}

impl Invocation {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            interactive: false,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

impl fmt::Display for Invocation {
    /// Renders the invocation the way an operator would type it, quoting arguments that
    /// contain whitespace.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;

        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg.replace('\'', r"'\''"))?;
            } else {
                write!(f, " {arg}")?;
            }
        }

        Ok(())
    }
}

/// Port for process execution (Hexagonal Architecture)
///
/// No timeout is applied at this layer. The automation backend has its own connection and
/// command timeouts; an in-flight invocation ends only when the whole process is terminated.
#[cfg_attr(any(test, feature = "with_mocks"), mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Check if a command is resolvable on the current `PATH`
    ///
    /// # Arguments
    ///
    /// * `command` - The command name to check (e.g., "ansible")
    ///
    /// # Returns
    ///
    /// `true` if the command is available, `false` otherwise
    async fn is_command_available(&self, command: &str) -> bool;

    /// Run `invocation` to completion and collect its output
    ///
    /// A non-zero exit status is *not* an error; inspect [`CommandOutput::is_success`].
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the process cannot be started or waited on.
    async fn execute(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError>;
}

/// Result of executing a command
///
/// Contains the exit status, both output streams, and how long the process ran.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal
    pub(crate) status_code: Option<i32>,
    pub(crate) stdout: Vec<u8>,
    pub(crate) stderr: Vec<u8>,

    /// How long the command took to execute
    pub(crate) duration: Duration,
}

impl CommandOutput {
    /// Build an output record by hand. Mostly useful for test doubles.
    #[must_use]
    pub fn new(
        status_code: Option<i32>,
        stdout: impl Into<Vec<u8>>,
        stderr: impl Into<Vec<u8>>,
        duration: Duration,
    ) -> Self {
        Self {
            status_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration,
        }
    }

    #[must_use]
    pub(crate) fn from_output(output: Output, duration: Duration) -> Self {
        Self {
            status_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
            duration,
        }
    }

    /// Get the command's exit code
    ///
    /// Returns -1 if the exit code cannot be determined (e.g., the process was terminated by a
    /// signal).
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.status_code.unwrap_or(-1)
    }

    #[must_use]
    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    #[must_use]
    pub fn stdout_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    #[must_use]
    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }

    #[must_use]
    pub fn stderr_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }

    /// Stdout followed by stderr, as lossy UTF-8
    #[must_use]
    pub fn combined_output(&self) -> String {
        let stdout = self.stdout_str();
        let stderr = self.stderr_str();

        match (stdout.is_empty(), stderr.is_empty()) {
            (_, true) => stdout.into_owned(),
            (true, false) => stderr.into_owned(),
            (false, false) if stdout.ends_with('\n') => format!("{stdout}{stderr}"),
            (false, false) => format!("{stdout}\n{stderr}"),
        }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns `true` if the command exited with status code 0
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code == Some(0)
    }
}

/// Errors that can occur while launching a command
#[derive(Error, Debug, Clone)]
pub enum CommandError {
    /// IO error occurred while starting or waiting on the command
    #[error("IO Error executing command '{command}': {source}")]
    IoError {
        command: String,
        working_directory: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },
}
