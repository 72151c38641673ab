//! Top-level control flow: token in, exit code out

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    commands::{CommandError, CommandRunner},
    config::AppConfig,
    fs::FileSystem,
    progress_reporter::port::ProgressReporter,
};

use super::{
    action::ActionDescriptor,
    command::{self, Command, UnknownCommand},
    executor::RemoteExecutor,
    preflight::{Preflight, PreflightError},
    steps::{self, DescriptorError},
};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

const PROGRAM_NAME: &str = "fleetops";

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Unknown(#[from] UnknownCommand),

    #[error(transparent)]
    Preflight(#[from] PreflightError),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error("Step {step}/{total} ({label}) failed with exit code {exit_code}")]
    StepFailed {
        step: usize,
        total: usize,
        label: String,
        exit_code: i32,
        output: String,
    },

    #[error("Step {step}/{total} ({label}) could not run: {source}")]
    Executor {
        step: usize,
        total: usize,
        label: String,
        #[source]
        source: CommandError,
    },
}

/// Runs one operator command end to end
///
/// `help` and unknown tokens never reach preflight. Everything else is preflighted, expanded
/// into action descriptors, and executed one descriptor at a time until the first failure.
pub struct Dispatcher<'a, E, CR, F, R>
where
    E: RemoteExecutor,
    CR: CommandRunner,
    F: FileSystem,
    R: ProgressReporter,
{
    config: &'a AppConfig,
    executor: &'a E,
    runner: &'a CR,
    fs: &'a F,
    reporter: &'a R,
}

impl<'a, E, CR, F, R> Dispatcher<'a, E, CR, F, R>
where
    E: RemoteExecutor,
    CR: CommandRunner,
    F: FileSystem,
    R: ProgressReporter,
{
    pub fn new(
        config: &'a AppConfig,
        executor: &'a E,
        runner: &'a CR,
        fs: &'a F,
        reporter: &'a R,
    ) -> Self {
        Self {
            config,
            executor,
            runner,
            fs,
            reporter,
        }
    }

    /// Run the command named by `token` and return the process exit code
    ///
    /// A missing or blank token means `help`. `args` are extra positional arguments, which no
    /// command takes; they are ignored with a warning.
    pub async fn dispatch(&self, token: Option<&str>, args: &[String]) -> i32 {
        match self.run(token, args).await {
            Ok(()) => EXIT_SUCCESS,
            Err(err) => {
                self.report_failure(&err);
                EXIT_FAILURE
            }
        }
    }

    async fn run(&self, token: Option<&str>, args: &[String]) -> Result<(), DispatchError> {
        let command = match token.map(str::trim).filter(|token| !token.is_empty()) {
            Some(token) => token.parse::<Command>()?,
            None => Command::Help,
        };
        debug!("Dispatching `{command}`");

        if command == Command::Help {
            self.reporter.report(command::usage(PROGRAM_NAME));
            return Ok(());
        }

        if !args.is_empty() {
            self.reporter.report_warning(format!(
                "Ignoring extra arguments: {}",
                args.join(" ")
            ));
        }

        Preflight::new(self.config, self.runner, self.fs, self.reporter)
            .validate(command)
            .await?;

        let actions = steps::build(command, self.config)?;
        self.execute_in_order(&actions).await?;

        info!("`{command}` finished: {} step(s) succeeded", actions.len());
        self.reporter.report_success(format!(
            "`{command}` succeeded on `{}`",
            self.config.target_group()
        ));
        Ok(())
    }

    /// Execute `actions` strictly in order, stopping at the first one that fails
    async fn execute_in_order(&self, actions: &[ActionDescriptor]) -> Result<(), DispatchError> {
        let total = actions.len();

        for (index, action) in actions.iter().enumerate() {
            let step = index + 1;
            self.reporter
                .report_progress(format!("[{step}/{total}] {}...", action.label()));

            let result = self
                .executor
                .execute(action, self.config.credentials())
                .await
                .map_err(|source| DispatchError::Executor {
                    step,
                    total,
                    label: action.label().to_string(),
                    source,
                })?;

            let output = result.output().trim_end();
            if !output.is_empty() {
                self.reporter.report(output);
            }

            if !result.succeeded() {
                return Err(DispatchError::StepFailed {
                    step,
                    total,
                    label: action.label().to_string(),
                    exit_code: result.exit_code(),
                    output: result.output().to_string(),
                });
            }
        }

        Ok(())
    }

    fn report_failure(&self, err: &DispatchError) {
        info!("Dispatch failed: {err}");
        self.reporter.report_error(err);

        match err {
            DispatchError::Unknown(_) => self.reporter.report(command::usage(PROGRAM_NAME)),
            DispatchError::Preflight(preflight) => {
                self.reporter.report_warning(preflight.remediation());
            }
            DispatchError::StepFailed { step, total, .. }
            | DispatchError::Executor { step, total, .. }
                if step < total =>
            {
                self.reporter.report_warning(format!(
                    "Skipped the remaining {} step(s); nothing was rolled back",
                    total - step
                ));
            }
            _ => {}
        }
    }
}
