//! `AppConfig` test helpers to eliminate duplication across dispatcher and CLI tests.

use crate::constants::{
    INVENTORY_FILE, PLAYBOOK_FILE, TEST_GROUP, TEST_INVENTORY, TEST_PRIVATE_KEY, TEST_SOURCE_REPO,
};
use fleetops::config::{AppConfig, AppConfigBuilder};
use std::path::Path;

/// Builder preloaded with a configuration that validates without errors or warnings.
/// Colors are disabled so rendered output is stable.
#[must_use]
pub fn test_config_builder() -> AppConfigBuilder {
    AppConfigBuilder::default()
        .inventory(TEST_INVENTORY)
        .target_group(TEST_GROUP)
        .private_key(TEST_PRIVATE_KEY)
        .source_repo(TEST_SOURCE_REPO)
        .use_colors(false)
}

/// Creates a standard test configuration.
/// This is the most commonly used config in tests that mock the file system.
#[must_use]
pub fn test_config() -> AppConfig {
    test_config_builder().build()
}

/// Creates a test configuration whose inventory and playbook live in `dir`.
/// Pair with [`crate::fixtures::write_inventory`] and [`crate::fixtures::write_playbook`].
pub fn test_config_with_dir<P: AsRef<Path>>(dir: P) -> AppConfig {
    let dir = dir.as_ref();

    test_config_builder()
        .inventory(dir.join(INVENTORY_FILE))
        .playbook(dir.join(PLAYBOOK_FILE))
        .build()
}
