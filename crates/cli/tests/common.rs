#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use test_common::{TEST_PRIVATE_KEY, TEST_SOURCE_REPO, write_config_file, write_inventory, write_playbook};

/// A throwaway operator workstation: config dir, inventory, playbook and an empty `bin/`
///
/// Commands built from it see only `bin/` on `PATH`, so a real Ansible installation on the
/// test machine is never picked up.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let sandbox = Self { dir };

        let inventory = write_inventory(sandbox.path());
        let playbook = write_playbook(sandbox.path());
        std::fs::create_dir_all(sandbox.bin_dir()).unwrap();

        sandbox.write_config(&format!(
            r#"inventory: "{}"
playbook: "{}"
credentials:
  private_key: "{TEST_PRIVATE_KEY}"
deployment:
  source_repo: "{TEST_SOURCE_REPO}"
use_colors: false
"#,
            inventory.display(),
            playbook.display()
        ));

        sandbox
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.path().join("config")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.path().join("bin")
    }

    pub fn log_file(&self) -> PathBuf {
        self.path().join("backend.log")
    }

    /// Replace the config file
    pub fn write_config(&self, yaml: &str) {
        write_config_file(&self.config_dir(), yaml);
    }

    /// Install fake `ansible` and `ansible-playbook` executables into `bin/`
    #[cfg(unix)]
    pub fn with_fake_ansible(self) -> Self {
        test_common::write_fake_backend(&self.bin_dir(), "ansible");
        test_common::write_fake_backend(&self.bin_dir(), "ansible-playbook");
        self
    }

    /// Every backend invocation recorded by the fake scripts
    pub fn backend_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.log_file())
            .unwrap_or_default()
            .lines()
            .map(ToString::to_string)
            .collect()
    }

    /// The CLI binary, isolated from the caller's environment
    #[must_use]
    pub fn command(&self) -> Command {
        let mut cmd = get_command();
        cmd.env_clear()
            .env("PATH", self.bin_dir())
            .env("FLEETOPS_CONFIG_DIR", self.config_dir())
            .env(test_common::FAKE_LOG_ENV, self.log_file());
        cmd
    }
}

// Helper function to get a command instance
#[must_use]
pub fn get_command() -> Command {
    Command::cargo_bin("fleetops").unwrap()
}
