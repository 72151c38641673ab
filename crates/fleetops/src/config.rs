pub mod loader;
pub mod validate;

pub use self::loader::{ApplyToConfig, ConfigLoadError, ConfigLoader, Yaml as YamlLoader};

use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use url::Url;

const VERBOSE_DEFAULT: bool = false;
const USE_COLORS_DEFAULT: bool = true;

/// Fixed window of log lines fetched by `logs`
pub const DEFAULT_LOG_LINES: u32 = 50;

/// Port the service's HTTP listener binds on every host
pub const DEFAULT_HEALTH_PORT: u16 = 33081;

/// Application configuration: what to operate on, and how to reach it
///
/// Built once at start-up (defaults, then the config file, then `FLEETOPS_*` environment
/// variables, then CLI overrides) and passed by reference everywhere after that.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Ansible inventory file or directory
    #[serde(default = "default_inventory")]
    pub(crate) inventory: PathBuf,

    #[serde(default)]
    pub(crate) target_group: TargetGroup,

    /// Ad-hoc backend executable
    #[serde(default = "default_backend")]
    pub(crate) backend: String,

    /// Playbook backend executable, used by `deploy`
    #[serde(default = "default_playbook_backend")]
    pub(crate) playbook_backend: String,

    #[serde(default = "default_playbook")]
    pub(crate) playbook: PathBuf,

    #[serde(default)]
    pub(crate) credentials: Credentials,

    #[serde(default)]
    pub(crate) service: ServiceSettings,

    #[serde(default)]
    pub(crate) deployment: DeploymentSettings,

    // UI settings
    #[serde(default)]
    pub(crate) verbose: bool,

    #[serde(default = "default_use_colors")]
    pub(crate) use_colors: bool,
}

fn default_inventory() -> PathBuf {
    PathBuf::from("inventory/hosts.ini")
}
fn default_backend() -> String {
    "ansible".to_string()
}
fn default_playbook_backend() -> String {
    "ansible-playbook".to_string()
}
fn default_playbook() -> PathBuf {
    PathBuf::from("playbooks/deploy.yml")
}
fn default_use_colors() -> bool {
    USE_COLORS_DEFAULT
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfigBuilder::default().build()
    }
}

impl AppConfig {
    #[must_use]
    pub fn inventory(&self) -> &Path {
        &self.inventory
    }

    #[must_use]
    pub fn target_group(&self) -> &TargetGroup {
        &self.target_group
    }

    #[must_use]
    pub fn backend(&self) -> &str {
        &self.backend
    }

    #[must_use]
    pub fn playbook_backend(&self) -> &str {
        &self.playbook_backend
    }

    #[must_use]
    pub fn playbook(&self) -> &Path {
        &self.playbook
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub fn service(&self) -> &ServiceSettings {
        &self.service
    }

    #[must_use]
    pub fn deployment(&self) -> &DeploymentSettings {
        &self.deployment
    }

    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    #[must_use]
    pub fn use_colors(&self) -> bool {
        self.use_colors
    }

    pub fn inventory_mut(&mut self) -> &mut PathBuf {
        &mut self.inventory
    }

    pub fn credentials_mut(&mut self) -> &mut Credentials {
        &mut self.credentials
    }

    pub fn verbose_mut(&mut self) -> &mut bool {
        &mut self.verbose
    }

    pub fn use_colors_mut(&mut self) -> &mut bool {
        &mut self.use_colors
    }
}

/// Named group of hosts from the inventory, e.g. `webservers`
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct TargetGroup(String);

impl TargetGroup {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TargetGroup {
    fn default() -> Self {
        Self::new("webservers")
    }
}

impl fmt::Display for TargetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the backend logs in to the hosts
///
/// Passed unchanged to every remote invocation. Secrets are never stored here; the `ask_*`
/// flags make the backend prompt on the operator's terminal instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub(crate) remote_user: String,
    pub(crate) private_key: PathBuf,

    /// Prompt for the SSH password
    pub(crate) ask_pass: bool,

    /// Prompt for the privilege-escalation password on elevated steps
    pub(crate) ask_become_pass: bool,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            remote_user: "deploy".to_string(),
            private_key: PathBuf::from("~/.ssh/id_rsa"),
            ask_pass: false,
            ask_become_pass: false,
        }
    }
}

impl Credentials {
    #[must_use]
    pub fn remote_user(&self) -> &str {
        &self.remote_user
    }

    #[must_use]
    pub fn private_key(&self) -> &Path {
        &self.private_key
    }

    #[must_use]
    pub fn ask_pass(&self) -> bool {
        self.ask_pass
    }

    #[must_use]
    pub fn ask_become_pass(&self) -> bool {
        self.ask_become_pass
    }

    /// `true` when the backend may need to read a secret from the terminal
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.ask_pass || self.ask_become_pass
    }

    pub fn remote_user_mut(&mut self) -> &mut String {
        &mut self.remote_user
    }

    pub fn private_key_mut(&mut self) -> &mut PathBuf {
        &mut self.private_key
    }

    pub fn ask_pass_mut(&mut self) -> &mut bool {
        &mut self.ask_pass
    }

    pub fn ask_become_pass_mut(&mut self) -> &mut bool {
        &mut self.ask_become_pass
    }
}

/// The managed service and its observable endpoints
///
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// systemd unit name
    pub(crate) name: String,

    /// journald unit to read logs from; defaults to `name`
    pub(crate) log_source: Option<String>,

    pub(crate) log_lines: u32,
    pub(crate) health_host: String,
    pub(crate) health_port: u16,
    pub(crate) health_path: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "rantoo".to_string(),
            log_source: None,
            log_lines: DEFAULT_LOG_LINES,
            health_host: "localhost".to_string(),
            health_port: DEFAULT_HEALTH_PORT,
            health_path: "/health".to_string(),
        }
    }
}

impl ServiceSettings {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn log_source(&self) -> &str {
        self.log_source.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn log_lines(&self) -> u32 {
        self.log_lines
    }

    #[must_use]
    pub fn health_port(&self) -> u16 {
        self.health_port
    }

    #[must_use]
    pub fn health_path(&self) -> &str {
        &self.health_path
    }

    /// URL probed *from each remote host* by `health`
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if the host or path do not form a valid URL.
    pub fn health_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!("http://{}:{}", self.health_host, self.health_port))?
            .join(&self.health_path)
    }
}

/// Where `update` pulls code from and where it lands on each host
///
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeploymentSettings {
    /// Git URL of the application source
    pub(crate) source_repo: String,
    pub(crate) app_path: PathBuf,

    /// Branch, tag or commit checked out on the hosts
    pub(crate) version: String,
    pub(crate) requirements: PathBuf,
    pub(crate) virtualenv: PathBuf,
}

impl Default for DeploymentSettings {
    fn default() -> Self {
        Self {
            source_repo: String::new(),
            app_path: PathBuf::from("/opt/rantoo"),
            version: "main".to_string(),
            requirements: PathBuf::from("/opt/rantoo/requirements.txt"),
            virtualenv: PathBuf::from("/opt/rantoo/venv"),
        }
    }
}

impl DeploymentSettings {
    #[must_use]
    pub fn source_repo(&self) -> &str {
        &self.source_repo
    }

    #[must_use]
    pub fn app_path(&self) -> &Path {
        &self.app_path
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn requirements(&self) -> &Path {
        &self.requirements
    }

    #[must_use]
    pub fn virtualenv(&self) -> &Path {
        &self.virtualenv
    }
}

/// Builder pattern for `AppConfig` testing
///
#[derive(Default, Debug)]
pub struct AppConfigBuilder {
    inventory: Option<PathBuf>,
    target_group: Option<TargetGroup>,
    backend: Option<String>,
    playbook_backend: Option<String>,
    playbook: Option<PathBuf>,
    credentials: Credentials,
    service: ServiceSettings,
    deployment: DeploymentSettings,
    verbose: Option<bool>,
    use_colors: Option<bool>,
}

impl AppConfigBuilder {
    #[must_use]
    pub fn inventory<P: AsRef<Path>>(mut self, inventory: P) -> Self {
        self.inventory = Some(inventory.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn target_group(mut self, target_group: &str) -> Self {
        self.target_group = Some(TargetGroup::new(target_group));
        self
    }

    #[must_use]
    pub fn backend(mut self, backend: &str) -> Self {
        self.backend = Some(backend.to_string());
        self
    }

    #[must_use]
    pub fn playbook_backend(mut self, playbook_backend: &str) -> Self {
        self.playbook_backend = Some(playbook_backend.to_string());
        self
    }

    #[must_use]
    pub fn playbook<P: AsRef<Path>>(mut self, playbook: P) -> Self {
        self.playbook = Some(playbook.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn remote_user(mut self, remote_user: &str) -> Self {
        self.credentials.remote_user = remote_user.to_string();
        self
    }

    #[must_use]
    pub fn private_key<P: AsRef<Path>>(mut self, private_key: P) -> Self {
        self.credentials.private_key = private_key.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn ask_pass(mut self, ask_pass: bool) -> Self {
        self.credentials.ask_pass = ask_pass;
        self
    }

    #[must_use]
    pub fn ask_become_pass(mut self, ask_become_pass: bool) -> Self {
        self.credentials.ask_become_pass = ask_become_pass;
        self
    }

    #[must_use]
    pub fn service_name(mut self, name: &str) -> Self {
        self.service.name = name.to_string();
        self
    }

    #[must_use]
    pub fn log_source(mut self, log_source: &str) -> Self {
        self.service.log_source = Some(log_source.to_string());
        self
    }

    #[must_use]
    pub fn log_lines(mut self, log_lines: u32) -> Self {
        self.service.log_lines = log_lines;
        self
    }

    #[must_use]
    pub fn health_port(mut self, port: u16) -> Self {
        self.service.health_port = port;
        self
    }

    #[must_use]
    pub fn health_path(mut self, path: &str) -> Self {
        self.service.health_path = path.to_string();
        self
    }

    #[must_use]
    pub fn source_repo(mut self, source_repo: &str) -> Self {
        self.deployment.source_repo = source_repo.to_string();
        self
    }

    #[must_use]
    pub fn app_path<P: AsRef<Path>>(mut self, app_path: P) -> Self {
        self.deployment.app_path = app_path.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn version(mut self, version: &str) -> Self {
        self.deployment.version = version.to_string();
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    #[must_use]
    pub fn use_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = Some(use_colors);
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        AppConfig {
            inventory: self.inventory.unwrap_or_else(default_inventory),
            target_group: self.target_group.unwrap_or_default(),
            backend: self.backend.unwrap_or_else(default_backend),
            playbook_backend: self
                .playbook_backend
                .unwrap_or_else(default_playbook_backend),
            playbook: self.playbook.unwrap_or_else(default_playbook),
            credentials: self.credentials,
            service: self.service,
            deployment: self.deployment,
            verbose: self.verbose.unwrap_or(VERBOSE_DEFAULT),
            use_colors: self.use_colors.unwrap_or(USE_COLORS_DEFAULT),
        }
    }
}
