// src/cli.rs
use std::path::PathBuf;

use clap::Parser;
use fleetops::operation::Command;

/// Fleetops - run lifecycle operations for a service across remote hosts
///
/// Commands: deploy, status, logs, restart, stop, start, update, health, help.
/// Running without a command prints the command list.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct ClapCli {
    /// Command to run
    ///
    #[clap(value_name = "COMMAND", allow_hyphen_values = true)]
    pub(crate) command: Option<String>,

    /// Extra arguments; no command takes any, so they are ignored
    ///
    #[clap(value_name = "ARGS", allow_hyphen_values = true, trailing_var_arg = true)]
    pub(crate) args: Vec<String>,

    /// Override the Ansible inventory from config
    ///
    #[clap(long, short = 'i')]
    pub(crate) inventory: Option<PathBuf>,

    /// Override the remote user from config
    ///
    #[clap(long, short = 'u')]
    pub(crate) user: Option<String>,

    /// Override the SSH private key from config
    ///
    #[clap(long, short = 'k')]
    pub(crate) private_key: Option<PathBuf>,

    /// Prompt for the SSH password
    ///
    #[clap(long, default_value_t = false)]
    pub(crate) ask_pass: bool,

    /// Prompt for the privilege escalation password on steps that need it
    ///
    #[clap(long, default_value_t = false)]
    pub(crate) ask_become_pass: bool,

    /// Show detailed output
    ///
    #[clap(long, short = 'v', default_value_t = false)]
    pub(crate) verbose: bool,

    /// Disable colored output
    ///
    #[clap(long, default_value_t = false)]
    pub(crate) no_color: bool,
}

impl ClapCli {
    /// Whether the requested command reads the configuration at all
    ///
    /// Usage and unknown tokens are answered without it, so a broken config file never
    /// changes their exit code.
    pub(crate) fn needs_config(&self) -> bool {
        self.command
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .and_then(|token| token.parse::<Command>().ok())
            .is_some_and(|command| command != Command::Help)
    }
}
