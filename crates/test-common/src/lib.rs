//! Common test utilities shared across all fleetops crates.
//!
//! This crate provides standardized test helpers (configurations, on-disk fixtures, and
//! recording fakes for the library's ports) so that tests stay short and readable.

pub mod config;
pub mod constants;
pub mod executor;
pub mod fixtures;
pub mod reporter;
pub mod runner;

// Re-export the most commonly used items for convenience
pub use config::{test_config, test_config_builder, test_config_with_dir};
pub use constants::*;
pub use executor::ScriptedExecutor;
pub use fixtures::{write_config_file, write_inventory, write_playbook};
#[cfg(unix)]
pub use fixtures::write_fake_backend;
pub use reporter::RecordingReporter;
pub use runner::StubRunner;

// Re-export commonly used external dependencies for convenience
pub use fleetops::config::{AppConfig, AppConfigBuilder};
pub use tempfile::TempDir;
