//! A [`CommandRunner`] stub for preflight tool lookups.

use async_trait::async_trait;
use fleetops::commands::{CommandError, CommandOutput, CommandRunner, Invocation};
use std::{collections::HashSet, sync::Mutex, time::Duration};

/// Reports a fixed set of tools as installed and records every lookup.
///
/// `execute` always succeeds with empty output; dispatcher tests reach the fleet through a
/// [`crate::ScriptedExecutor`] instead.
#[derive(Debug, Default)]
pub struct StubRunner {
    available: HashSet<String>,
    lookups: Mutex<Vec<String>>,
}

impl StubRunner {
    /// Both `ansible` and `ansible-playbook` are installed
    #[must_use]
    pub fn with_ansible() -> Self {
        Self::with_tools(["ansible", "ansible-playbook"])
    }

    /// Nothing is installed
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tools<'a, I: IntoIterator<Item = &'a str>>(tools: I) -> Self {
        Self {
            available: tools.into_iter().map(ToString::to_string).collect(),
            lookups: Mutex::default(),
        }
    }

    /// Every tool name looked up so far, in order
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for StubRunner {
    async fn is_command_available(&self, command: &str) -> bool {
        self.lookups.lock().unwrap().push(command.to_string());
        self.available.contains(command)
    }

    async fn execute(&self, _invocation: &Invocation) -> Result<CommandOutput, CommandError> {
        Ok(CommandOutput::new(Some(0), "", "", Duration::ZERO))
    }
}
