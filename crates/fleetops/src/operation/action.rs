use std::{collections::BTreeMap, fmt};

use crate::config::TargetGroup;

/// What kind of remote operation an action performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Reachability and login check
    Ping,
    ServiceStateQuery,
    ServiceStateSet,
    ShellExec,
    /// Check out the application source at a fixed version
    FileSync,
    /// Install Python requirements into the service's virtualenv
    DependencySync,
    HttpProbe,
    /// Apply the deployment playbook
    PlaybookApply,
}

impl OperationKind {
    /// `true` for operations that never change remote state
    #[must_use]
    pub fn is_read_only(self) -> bool {
        matches!(
            self,
            Self::Ping | Self::ServiceStateQuery | Self::ShellExec | Self::HttpProbe
        )
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ping => "ping",
            Self::ServiceStateQuery => "service-state-query",
            Self::ServiceStateSet => "service-state-set",
            Self::ShellExec => "shell-exec",
            Self::FileSync => "file-sync",
            Self::DependencySync => "dependency-sync",
            Self::HttpProbe => "http-probe",
            Self::PlaybookApply => "playbook-apply",
        })
    }
}

/// Fully specified description of one remote operation
///
/// Built by [`super::steps::build`], consumed once by a [`super::RemoteExecutor`]. There is no
/// way to change a descriptor after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    label: String,
    target: TargetGroup,
    kind: OperationKind,
    params: BTreeMap<String, String>,
    elevated: bool,
}

impl ActionDescriptor {
    pub(crate) fn new(
        label: impl Into<String>,
        target: &TargetGroup,
        kind: OperationKind,
        elevated: bool,
    ) -> Self {
        Self {
            label: label.into(),
            target: target.clone(),
            kind,
            params: BTreeMap::new(),
            elevated,
        }
    }

    pub(crate) fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Progress text shown while this action runs, e.g. "Testing connection"
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn target(&self) -> &TargetGroup {
        &self.target
    }

    #[must_use]
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    #[must_use]
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Whether the backend must escalate privileges on the hosts
    #[must_use]
    pub fn requires_elevation(&self) -> bool {
        self.elevated
    }
}

impl fmt::Display for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.kind, self.target)?;
        if self.elevated {
            f.write_str(" (elevated)")?;
        }
        Ok(())
    }
}
