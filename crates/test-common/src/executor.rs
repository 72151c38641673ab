//! A [`RemoteExecutor`] fake that replays scripted exit codes.

use async_trait::async_trait;
use fleetops::{
    commands::CommandError,
    config::Credentials,
    operation::{ActionDescriptor, ExecutionResult, RemoteExecutor},
};
use std::{collections::VecDeque, sync::Mutex};

/// Returns the scripted exit codes in order (0 once the script runs out) and records every
/// descriptor it was asked to run.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    exit_codes: Mutex<VecDeque<i32>>,
    output: String,
    calls: Mutex<Vec<ActionDescriptor>>,
}

impl ScriptedExecutor {
    /// Every call succeeds
    #[must_use]
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// The n-th call exits with the n-th code
    #[must_use]
    pub fn with_exit_codes<I: IntoIterator<Item = i32>>(exit_codes: I) -> Self {
        Self {
            exit_codes: Mutex::new(exit_codes.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Output text attached to every result
    #[must_use]
    pub fn with_output(mut self, output: &str) -> Self {
        self.output = output.to_string();
        self
    }

    /// Descriptors executed so far, in order
    pub fn calls(&self) -> Vec<ActionDescriptor> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RemoteExecutor for ScriptedExecutor {
    async fn execute(
        &self,
        action: &ActionDescriptor,
        _credentials: &Credentials,
    ) -> Result<ExecutionResult, CommandError> {
        self.calls.lock().unwrap().push(action.clone());
        let exit_code = self.exit_codes.lock().unwrap().pop_front().unwrap_or(0);

        Ok(ExecutionResult::new(exit_code, self.output.clone()))
    }
}
