use std::{fmt, str::FromStr};

use thiserror::Error;

/// Every operation the CLI understands
///
/// Token parsing ([`FromStr`]) is the only place a string is matched; everything downstream
/// works on this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Deploy,
    Status,
    Logs,
    Restart,
    Stop,
    Start,
    Update,
    Health,
    Help,
}

impl Command {
    pub const ALL: [Self; 9] = [
        Self::Deploy,
        Self::Status,
        Self::Logs,
        Self::Restart,
        Self::Stop,
        Self::Start,
        Self::Update,
        Self::Health,
        Self::Help,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Deploy => "deploy",
            Self::Status => "status",
            Self::Logs => "logs",
            Self::Restart => "restart",
            Self::Stop => "stop",
            Self::Start => "start",
            Self::Update => "update",
            Self::Health => "health",
            Self::Help => "help",
        }
    }

    /// One-line description shown in the usage text
    #[must_use]
    pub fn summary(self) -> &'static str {
        match self {
            Self::Deploy => "Test connectivity, then run the deployment playbook",
            Self::Status => "Show the service's run state on every host",
            Self::Logs => "Show the most recent service log lines",
            Self::Restart => "Restart the service",
            Self::Stop => "Stop the service",
            Self::Start => "Start the service",
            Self::Update => {
                "Sync code from `deployment.source_repo` and dependencies, then restart"
            }
            Self::Health => "Probe the service's health endpoint on every host",
            Self::Help => "Show this message",
        }
    }

    /// `deploy` is the only command that runs a playbook
    #[must_use]
    pub fn uses_playbook(self) -> bool {
        matches!(self, Self::Deploy)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "-h" | "--help" => Ok(Self::Help),
            _ => Self::ALL
                .into_iter()
                .find(|command| command.name() == token)
                .ok_or_else(|| UnknownCommand(token.to_string())),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown command: {0}")]
pub struct UnknownCommand(pub String);

/// Usage text listing every command
#[must_use]
pub fn usage(program: &str) -> String {
    let width = Command::ALL
        .iter()
        .map(|c| c.name().len())
        .max()
        .unwrap_or_default();

    let mut text = format!("Usage: {program} [OPTIONS] [COMMAND]\n\nCommands:\n");
    for command in Command::ALL {
        text.push_str(&format!(
            "  {:width$}  {}\n",
            command.name(),
            command.summary()
        ));
    }
    text.push_str(&format!(
        "\nRun `{program} --help` for the list of options."
    ));

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_round_trips() {
        for command in Command::ALL {
            assert_eq!(command.name().parse::<Command>(), Ok(command));
        }
    }

    #[test]
    fn test_help_flags_parse_as_help() {
        assert_eq!("-h".parse::<Command>(), Ok(Command::Help));
        assert_eq!("--help".parse::<Command>(), Ok(Command::Help));
    }

    #[test]
    fn test_unknown_tokens_are_rejected() {
        for token in ["", "Deploy", "restart!", "rollback", " status"] {
            assert_eq!(
                token.parse::<Command>(),
                Err(UnknownCommand(token.to_string()))
            );
        }
    }

    #[test]
    fn test_unknown_command_message() {
        assert_eq!(
            UnknownCommand("rollback".to_string()).to_string(),
            "Unknown command: rollback"
        );
    }

    #[test]
    fn test_only_deploy_uses_playbook() {
        let with_playbook: Vec<_> = Command::ALL
            .into_iter()
            .filter(|c| c.uses_playbook())
            .collect();

        assert_eq!(with_playbook, vec![Command::Deploy]);
    }

    #[test]
    fn test_update_summary_names_its_source_setting() {
        let text = usage("fleetops");

        let line = text
            .lines()
            .find(|line| line.trim_start().starts_with("update"))
            .unwrap();
        assert!(line.contains("deployment.source_repo"));
    }

    #[test]
    fn test_usage_lists_every_command() {
        let text = usage("fleetops");

        assert!(text.starts_with("Usage: fleetops"));
        for command in Command::ALL {
            assert!(text.contains(command.name()));
            assert!(text.contains(command.summary()));
        }
    }
}
