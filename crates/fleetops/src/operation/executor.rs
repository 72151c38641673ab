//! Remote execution through the Ansible command-line tools
//!
//! The [`RemoteExecutor`] port is the only boundary between the dispatcher and the fleet.
//! [`AnsibleExecutor`] implements it by translating each [`ActionDescriptor`] into exactly
//! one `ansible` (or, for playbooks, `ansible-playbook`) invocation. Fan-out across the hosts
//! in the target group, SSH, and privilege escalation are all left to Ansible.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::{
    commands::{CommandError, CommandOutput, CommandRunner, Invocation},
    config::{AppConfig, Credentials},
};

use super::action::{ActionDescriptor, OperationKind};

/// Normalized outcome of one remote action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    succeeded: bool,
    output: String,
    exit_code: i32,
}

impl ExecutionResult {
    /// Exit code 0 is success; anything else, including -1 for a signal, is failure
    #[must_use]
    pub fn new(exit_code: i32, output: impl Into<String>) -> Self {
        Self {
            succeeded: exit_code == 0,
            output: output.into(),
            exit_code,
        }
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Combined stdout and stderr of the backend
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }
}

impl From<&CommandOutput> for ExecutionResult {
    fn from(output: &CommandOutput) -> Self {
        Self::new(output.exit_code(), output.combined_output())
    }
}

/// Port for running one action against the fleet
///
/// Implementations block the caller until the action finishes and never retry; a failed
/// connection and a failed remote command look the same from here.
#[cfg_attr(any(test, feature = "with_mocks"), mockall::automock)]
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// Run `action` with `credentials`
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] only if the backend could not be started at all. A backend
    /// that ran and failed is an [`ExecutionResult`] whose `succeeded()` is `false`.
    async fn execute(
        &self,
        action: &ActionDescriptor,
        credentials: &Credentials,
    ) -> Result<ExecutionResult, CommandError>;
}

/// [`RemoteExecutor`] backed by `ansible` / `ansible-playbook`
#[derive(Debug, Clone)]
pub struct AnsibleExecutor<CR: CommandRunner> {
    runner: CR,
    inventory: PathBuf,
    backend: String,
    playbook_backend: String,
}

impl<CR: CommandRunner> AnsibleExecutor<CR> {
    pub fn new(runner: CR, config: &AppConfig) -> Self {
        Self {
            runner,
            inventory: config.inventory().to_path_buf(),
            backend: config.backend().to_string(),
            playbook_backend: config.playbook_backend().to_string(),
        }
    }

    /// The exact backend invocation that [`RemoteExecutor::execute`] would run
    #[must_use]
    pub fn invocation(&self, action: &ActionDescriptor, credentials: &Credentials) -> Invocation {
        let inventory = self.inventory.to_string_lossy();
        let target = action.target().as_str();

        let (module, module_args) = match action.kind() {
            OperationKind::PlaybookApply => {
                let invocation = Invocation::new(&self.playbook_backend)
                    .args(["-i", &*inventory])
                    .arg(action.get("playbook").unwrap_or_default())
                    .args(["--limit", target]);
                return with_credentials(invocation, action, credentials);
            }
            OperationKind::Ping => ("ping", None),
            OperationKind::ServiceStateQuery => (
                "command",
                Some(format!(
                    "systemctl status {} --no-pager",
                    action.get("name").unwrap_or_default()
                )),
            ),
            OperationKind::ShellExec => ("shell", action.get("cmd").map(ToString::to_string)),
            OperationKind::ServiceStateSet => ("systemd", Some(key_value_args(action))),
            OperationKind::FileSync => ("git", Some(key_value_args(action))),
            OperationKind::DependencySync => ("pip", Some(key_value_args(action))),
            OperationKind::HttpProbe => ("uri", Some(key_value_args(action))),
        };

        let mut invocation = Invocation::new(&self.backend)
            .arg(target)
            .args(["-i", &*inventory, "-m", module]);
        if let Some(module_args) = module_args {
            invocation = invocation.args(["-a".to_string(), module_args]);
        }

        with_credentials(invocation, action, credentials)
    }
}

#[async_trait]
impl<CR: CommandRunner> RemoteExecutor for AnsibleExecutor<CR> {
    async fn execute(
        &self,
        action: &ActionDescriptor,
        credentials: &Credentials,
    ) -> Result<ExecutionResult, CommandError> {
        let invocation = self.invocation(action, credentials);
        info!("Executing {action}");
        debug!("Backend invocation: {invocation}");

        let output = self.runner.execute(&invocation).await?;
        debug!(
            "Backend exited with code {} after {:?}",
            output.exit_code(),
            output.duration()
        );

        Ok(ExecutionResult::from(&output))
    }
}

/// Render params as `key=value` pairs, double-quoting values that contain whitespace
fn key_value_args(action: &ActionDescriptor) -> String {
    action
        .params()
        .iter()
        .map(|(key, value)| {
            if value.is_empty() || value.contains(char::is_whitespace) || value.contains('"') {
                format!(r#"{key}="{}""#, value.replace('\\', r"\\").replace('"', r#"\""#))
            } else {
                format!("{key}={value}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn with_credentials(
    invocation: Invocation,
    action: &ActionDescriptor,
    credentials: &Credentials,
) -> Invocation {
    let mut invocation = invocation.args(["-u", credentials.remote_user()]);

    let private_key = credentials.private_key().to_string_lossy();
    if !private_key.is_empty() {
        invocation = invocation.args(["--private-key", &*private_key]);
    }

    if credentials.ask_pass() {
        invocation = invocation.arg("--ask-pass");
    }

    let prompts_for_become = action.requires_elevation() && credentials.ask_become_pass();
    if action.requires_elevation() {
        invocation = invocation.arg("--become");
    }
    if prompts_for_become {
        invocation = invocation.arg("--ask-become-pass");
    }

    invocation.interactive(credentials.ask_pass() || prompts_for_become)
}
