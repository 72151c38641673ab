//! Expands a [`Command`] into the ordered action descriptors that carry it out.
//!
//! Every function here is pure: the same command and configuration always produce the same
//! descriptors.

use thiserror::Error;

use crate::config::AppConfig;

use super::{
    action::{ActionDescriptor, OperationKind},
    command::Command,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DescriptorError {
    #[error("Invalid health endpoint: {0}")]
    InvalidHealthUrl(#[from] url::ParseError),

    #[error("`{0}` must be configured for this command")]
    MissingSetting(&'static str),
}

/// Build the descriptors for `command`, in execution order
///
/// `help` expands to nothing; every other command expands to at least one descriptor.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the configuration lacks a value the command needs.
pub fn build(command: Command, config: &AppConfig) -> Result<Vec<ActionDescriptor>, DescriptorError> {
    let actions = match command {
        Command::Deploy => vec![ping(config), apply_playbook(config)],
        Command::Status => vec![query_service(config)],
        Command::Logs => vec![read_logs(config)],
        Command::Restart => vec![set_service_state(config, ServiceState::Restarted)],
        Command::Stop => vec![set_service_state(config, ServiceState::Stopped)],
        Command::Start => vec![set_service_state(config, ServiceState::Started)],
        Command::Update => vec![
            sync_code(config)?,
            sync_dependencies(config),
            set_service_state(config, ServiceState::Restarted),
        ],
        Command::Health => vec![probe_health(config)?],
        Command::Help => Vec::new(),
    };

    Ok(actions)
}

#[derive(Debug, Clone, Copy)]
enum ServiceState {
    Restarted,
    Stopped,
    Started,
}

impl ServiceState {
    fn as_str(self) -> &'static str {
        match self {
            Self::Restarted => "restarted",
            Self::Stopped => "stopped",
            Self::Started => "started",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Restarted => "Restarting service",
            Self::Stopped => "Stopping service",
            Self::Started => "Starting service",
        }
    }
}

fn ping(config: &AppConfig) -> ActionDescriptor {
    ActionDescriptor::new(
        "Testing connection",
        config.target_group(),
        OperationKind::Ping,
        false,
    )
}

fn apply_playbook(config: &AppConfig) -> ActionDescriptor {
    ActionDescriptor::new(
        "Running deployment",
        config.target_group(),
        OperationKind::PlaybookApply,
        true,
    )
    .param("playbook", config.playbook().to_string_lossy())
}

fn query_service(config: &AppConfig) -> ActionDescriptor {
    ActionDescriptor::new(
        "Checking service status",
        config.target_group(),
        OperationKind::ServiceStateQuery,
        false,
    )
    .param("name", config.service().name())
}

fn read_logs(config: &AppConfig) -> ActionDescriptor {
    let service = config.service();

    ActionDescriptor::new(
        format!("Fetching last {} log lines", service.log_lines()),
        config.target_group(),
        OperationKind::ShellExec,
        false,
    )
    .param(
        "cmd",
        format!(
            "journalctl -u {} -n {} --no-pager",
            service.log_source(),
            service.log_lines()
        ),
    )
}

fn set_service_state(config: &AppConfig, state: ServiceState) -> ActionDescriptor {
    ActionDescriptor::new(
        state.label(),
        config.target_group(),
        OperationKind::ServiceStateSet,
        true,
    )
    .param("name", config.service().name())
    .param("state", state.as_str())
}

fn sync_code(config: &AppConfig) -> Result<ActionDescriptor, DescriptorError> {
    let deployment = config.deployment();

    if deployment.source_repo().trim().is_empty() {
        return Err(DescriptorError::MissingSetting("deployment.source_repo"));
    }

    Ok(ActionDescriptor::new(
        "Syncing code",
        config.target_group(),
        OperationKind::FileSync,
        true,
    )
    .param("repo", deployment.source_repo())
    .param("dest", deployment.app_path().to_string_lossy())
    .param("version", deployment.version()))
}

fn sync_dependencies(config: &AppConfig) -> ActionDescriptor {
    let deployment = config.deployment();

    ActionDescriptor::new(
        "Syncing dependencies",
        config.target_group(),
        OperationKind::DependencySync,
        true,
    )
    .param("requirements", deployment.requirements().to_string_lossy())
    .param("virtualenv", deployment.virtualenv().to_string_lossy())
}

fn probe_health(config: &AppConfig) -> Result<ActionDescriptor, DescriptorError> {
    let url = config.service().health_url()?;

    Ok(ActionDescriptor::new(
        "Checking health",
        config.target_group(),
        OperationKind::HttpProbe,
        false,
    )
    .param("url", url.as_str())
    .param("status_code", "200"))
}
