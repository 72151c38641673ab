// System process runner adapter implementation

use std::{path::Path, process::Stdio, sync::Arc, time::Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::runner::{CommandError, CommandOutput, CommandRunner, Invocation};

/// Runs programs directly on the local machine
///
#[derive(Clone, Debug)]
pub struct SystemCommandRunner {
    /// Shell used to resolve commands on `PATH`
    ///
    shell: String,
}

impl SystemCommandRunner {
    #[must_use]
    pub fn new(shell: &str) -> Self {
        Self {
            shell: shell.to_string(),
        }
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new("/bin/sh")
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    /// Checks if `command` is available.
    ///
    async fn is_command_available(&self, command: &str) -> bool {
        // The name travels as a positional parameter so it is never parsed as shell syntax
        let probe = Invocation::new(&self.shell).args([
            "-c",
            r#"command -v "$1" >/dev/null 2>&1"#,
            "command-probe",
            command,
        ]);

        match self.execute(&probe).await {
            Ok(output) => output.is_success(),
            Err(_) => false,
        }
    }

    async fn execute(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError> {
        let start_time = Instant::now();
        debug!("Running: {invocation}");

        let stdin = if invocation.is_interactive() {
            Stdio::inherit()
        } else {
            Stdio::null()
        };

        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.arguments())
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = cmd.output().await.map_err(|e| CommandError::IoError {
            command: invocation.to_string(),
            working_directory: std::env::current_dir()
                .unwrap_or_else(|_| Path::new(".").to_path_buf()),
            source: Arc::new(e),
        })?;

        Ok(CommandOutput::from_output(output, start_time.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests actually run commands on the system
    #[tokio::test]
    async fn test_system_command_runner_basic() {
        let runner = SystemCommandRunner::default();

        let output = runner
            .execute(&Invocation::new("echo").arg("hello"))
            .await
            .unwrap();
        assert!(output.stdout_str().contains("hello"));
        assert!(output.is_success());

        let output = runner
            .execute(&Invocation::new("/bin/sh").args(["-c", "exit 1"]))
            .await
            .unwrap();
        assert!(!output.is_success());
        assert_eq!(output.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_command_availability() {
        let runner = SystemCommandRunner::default();

        assert!(runner.is_command_available("sh").await);
        assert!(!runner.is_command_available("xyzabc123notarealcommand").await);
    }

    #[tokio::test]
    async fn test_command_availability_does_not_interpret_shell_syntax() {
        let runner = SystemCommandRunner::default();

        assert!(!runner.is_command_available("sh; true").await);
        assert!(!runner.is_command_available("$(echo sh)").await);
    }

    #[tokio::test]
    async fn test_arguments_are_not_split_by_a_shell() {
        let runner = SystemCommandRunner::default();

        let output = runner
            .execute(&Invocation::new("printf").args(["%s|", "two words", "$HOME"]))
            .await
            .unwrap();

        assert_eq!(output.stdout_str(), "two words|$HOME|");
    }

    #[tokio::test]
    async fn test_missing_program_is_an_io_error() {
        let runner = SystemCommandRunner::default();

        let result = runner
            .execute(&Invocation::new("nonexistent_command_12345_xyz"))
            .await;

        match result {
            Err(CommandError::IoError { command, .. }) => {
                assert_eq!(command, "nonexistent_command_12345_xyz");
            }
            Ok(output) => panic!("Expected IoError, got output: {output:?}"),
        }
    }

    #[tokio::test]
    async fn test_stderr_is_captured_separately() {
        let runner = SystemCommandRunner::default();

        let output = runner
            .execute(&Invocation::new("/bin/sh").args(["-c", "echo out; echo err >&2; exit 3"]))
            .await
            .unwrap();

        assert_eq!(output.exit_code(), 3);
        assert_eq!(output.stdout_str(), "out\n");
        assert_eq!(output.stderr_str(), "err\n");
        assert_eq!(output.combined_output(), "out\nerr\n");
    }
}
