//! Local checks that must pass before anything touches the fleet

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    commands::CommandRunner,
    config::AppConfig,
    fs::{FileSystem, FileSystemError},
    progress_reporter::port::ProgressReporter,
    validation::{ValidationIssues, ValidationLevel},
};

use super::command::Command;

#[derive(Error, Debug, Clone)]
pub enum PreflightError {
    #[error("Configuration has {} error(s)", .0.errors().len())]
    InvalidConfig(ValidationIssues),

    #[error("`{tool}` was not found on PATH")]
    MissingTool { tool: String },

    #[error("Inventory `{}` is not readable: {source}", path.display())]
    MissingInventory {
        path: PathBuf,
        #[source]
        source: FileSystemError,
    },

    #[error("Playbook `{}` is not readable: {source}", path.display())]
    MissingPlaybook {
        path: PathBuf,
        #[source]
        source: FileSystemError,
    },
}

impl PreflightError {
    /// What the operator should do about it
    #[must_use]
    pub fn remediation(&self) -> String {
        match self {
            Self::InvalidConfig(_) => {
                "Fix the configuration errors listed above and run the command again".to_string()
            }
            Self::MissingTool { tool } => format!(
                "Install Ansible (e.g. `pipx install --include-deps ansible` or your package \
                 manager's `ansible` package) and make sure `{tool}` is on PATH"
            ),
            Self::MissingInventory { .. } => {
                "Create the inventory file, or point to it with `--inventory <PATH>`".to_string()
            }
            Self::MissingPlaybook { .. } => {
                "Create the playbook, or set `playbook` in the configuration file".to_string()
            }
        }
    }
}

/// Runs the local environment checks for one command
///
/// Every check is local: nothing here contacts a remote host.
pub struct Preflight<'a, CR, F, R>
where
    CR: CommandRunner,
    F: FileSystem,
    R: ProgressReporter,
{
    config: &'a AppConfig,
    runner: &'a CR,
    fs: &'a F,
    reporter: &'a R,
}

impl<'a, CR, F, R> Preflight<'a, CR, F, R>
where
    CR: CommandRunner,
    F: FileSystem,
    R: ProgressReporter,
{
    pub fn new(config: &'a AppConfig, runner: &'a CR, fs: &'a F, reporter: &'a R) -> Self {
        Self {
            config,
            runner,
            fs,
            reporter,
        }
    }

    /// Check everything `command` needs, in order, stopping at the first failure
    ///
    /// Configuration errors come first, then the backend executables, then the inventory,
    /// then (for `deploy`) the playbook. Each passing check emits one info line.
    ///
    /// # Errors
    ///
    /// Returns the first [`PreflightError`] encountered.
    pub async fn validate(&self, command: Command) -> Result<(), PreflightError> {
        debug!("Running preflight checks for `{command}`");

        self.check_config()?;
        self.check_tool(self.config.backend()).await?;

        if command.uses_playbook() {
            self.check_tool(self.config.playbook_backend()).await?;
        }

        let inventory = self.fs.expand_path(self.config.inventory());
        self.fs
            .check_readable(&inventory)
            .map_err(|source| PreflightError::MissingInventory {
                path: inventory.clone(),
                source,
            })?;
        self.reporter
            .report_info(format!("Inventory `{}` is readable", inventory.display()));

        if command.uses_playbook() {
            let playbook = self.fs.expand_path(self.config.playbook());
            self.fs
                .check_readable(&playbook)
                .map_err(|source| PreflightError::MissingPlaybook {
                    path: playbook.clone(),
                    source,
                })?;
            self.reporter
                .report_info(format!("Playbook `{}` is readable", playbook.display()));
        }

        info!("Preflight checks passed for `{command}`");
        Ok(())
    }

    fn check_config(&self) -> Result<(), PreflightError> {
        let issues = self.config.validate();

        for issue in issues.iter() {
            match issue.level() {
                ValidationLevel::Error => self.reporter.report_error(issue),
                ValidationLevel::Warning => self.reporter.report_warning(issue),
            }
        }

        if issues.has_errors() {
            return Err(PreflightError::InvalidConfig(issues));
        }

        self.reporter.report_info("Configuration is valid");
        Ok(())
    }

    async fn check_tool(&self, tool: &str) -> Result<(), PreflightError> {
        if !self.runner.is_command_available(tool).await {
            return Err(PreflightError::MissingTool {
                tool: tool.to_string(),
            });
        }

        self.reporter.report_info(format!("Found `{tool}`"));
        Ok(())
    }
}
