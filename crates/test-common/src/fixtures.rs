//! On-disk fixtures: inventories, playbooks, config files and a fake Ansible.

use crate::constants::{FAKE_EXIT_ENV, FAKE_LOG_ENV, INVENTORY_FILE, PLAYBOOK_FILE, TEST_GROUP};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Writes a one-host INI inventory for the test group into `dir`.
///
/// # Example
/// ```rust
/// let temp_dir = TempDir::new().unwrap();
/// let inventory = write_inventory(temp_dir.path());
/// ```
pub fn write_inventory(dir: &Path) -> PathBuf {
    let content = format!("[{TEST_GROUP}]\nweb1 ansible_host=127.0.0.1\n");

    let path = dir.join(INVENTORY_FILE);
    fs::write(&path, content).unwrap();
    path
}

/// Writes a minimal deployment playbook into `dir`.
pub fn write_playbook(dir: &Path) -> PathBuf {
    let content = format!(
        r#"- hosts: {TEST_GROUP}
  become: true
  tasks:
    - name: Restart service
      ansible.builtin.systemd:
        name: rantoo
        state: restarted
"#
    );

    let path = dir.join(PLAYBOOK_FILE);
    fs::write(&path, content).unwrap();
    path
}

/// Writes `config.yaml` into `config_dir`, creating the directory first.
pub fn write_config_file(config_dir: &Path, yaml: &str) -> PathBuf {
    fs::create_dir_all(config_dir).unwrap();

    let path = config_dir.join("config.yaml");
    fs::write(&path, yaml).unwrap();
    path
}

/// Writes an executable stand-in for `ansible`/`ansible-playbook` named `name` into `bin_dir`.
///
/// The script prints its arguments, appends them to `$FAKE_LOG` when set, and exits with
/// `$FAKE_EXIT` (default 0). Put `bin_dir` first on `PATH` to use it.
#[cfg(unix)]
pub fn write_fake_backend(bin_dir: &Path, name: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = format!(
        r#"#!/bin/sh
echo "{name} $*"
if [ -n "${FAKE_LOG_ENV}" ]; then
    echo "{name} $*" >> "${FAKE_LOG_ENV}"
fi
exit "${{{FAKE_EXIT_ENV}:-0}}"
"#
    );

    fs::create_dir_all(bin_dir).unwrap();
    let path = bin_dir.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
