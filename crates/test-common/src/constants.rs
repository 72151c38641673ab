//! Common test constants used across multiple test files.

/// Inventory group every test targets
pub const TEST_GROUP: &str = "webservers";

/// Inventory path for tests that never touch the disk
pub const TEST_INVENTORY: &str = "/tmp/fleetops-test/hosts.ini";

/// Absolute key path, so configuration validation stays quiet
pub const TEST_PRIVATE_KEY: &str = "/tmp/fleetops-test/id_ed25519";

pub const TEST_SOURCE_REPO: &str = "https://git.example.com/rantoo.git";

/// Inventory file name written by [`crate::fixtures::write_inventory`]
pub const INVENTORY_FILE: &str = "hosts.ini";

/// Playbook file name written by [`crate::fixtures::write_playbook`]
pub const PLAYBOOK_FILE: &str = "deploy.yml";

/// Environment variable read by the fake backend script: its exit code
pub const FAKE_EXIT_ENV: &str = "FAKE_EXIT";

/// Environment variable read by the fake backend script: file that records every argv
pub const FAKE_LOG_ENV: &str = "FAKE_LOG";
