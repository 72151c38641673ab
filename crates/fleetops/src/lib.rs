//! Fleetops - lifecycle operations for a service deployed across remote hosts
//!
//! The `fleetops` library turns an operator command (`deploy`, `status`, `update`, ...) into an
//! ordered list of remote actions, gates them behind local preflight checks, and runs them one
//! at a time through an external automation backend (Ansible). The first failing action stops
//! the sequence and becomes a non-zero process exit code.
//!
//! # Architecture
//!
//! Like a ports-and-adapters application, the decision logic is isolated from the outside
//! world through narrow traits:
//!
//! - [`commands::CommandRunner`] - launching local processes
//! - [`fs::FileSystem`] - reading configuration and checking inventory files
//! - [`operation::RemoteExecutor`] - running one action descriptor on the fleet
//! - [`progress_reporter::port::ProgressReporter`] - operator-facing output
//!
//! # Main Components
//!
//! - [`operation`] - commands, action descriptors, preflight, executor and dispatcher
//! - [`config`] - application configuration loading and validation
//! - [`commands`] - process execution abstractions
//! - [`fs`] - file system abstractions
//! - [`validation`] - validation types and utilities
//!
//! # Examples
//!
//! ```no_run
//! use fleetops::{
//!     commands::SystemCommandRunner,
//!     config::AppConfigBuilder,
//!     fs::RealFileSystem,
//!     operation::{AnsibleExecutor, Dispatcher},
//!     progress_reporter::terminal::TerminalProgressReporter,
//! };
//!
//! # async fn run() -> i32 {
//! let config = AppConfigBuilder::default().inventory("inventory.ini").build();
//! let runner = SystemCommandRunner::default();
//! let executor = AnsibleExecutor::new(runner.clone(), &config);
//! let reporter = TerminalProgressReporter::new(config.use_colors());
//!
//! Dispatcher::new(&config, &executor, &runner, &RealFileSystem, &reporter)
//!     .dispatch(Some("status"), &[])
//!     .await
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod fs;
pub mod operation;
pub mod progress_reporter;
pub mod validation;
