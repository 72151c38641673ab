use std::path::PathBuf;

use config::{Environment, FileFormat};
use tracing::debug;

use crate::{config::AppConfig, fs::FileSystem};

use super::{ConfigLoadError, ConfigLoader};

/// Prefix of environment variables that override configuration values
///
/// Nested keys use a double underscore, e.g. `FLEETOPS_CREDENTIALS__REMOTE_USER`.
pub const ENV_PREFIX: &str = "FLEETOPS";

pub struct Yaml<'a, F: FileSystem> {
    fs: &'a F,

    /// Stand-in for the process environment; `None` reads the real one
    environment: Option<config::Map<String, String>>,
}

impl<'a, F: FileSystem> Yaml<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self {
            fs,
            environment: None,
        }
    }

    /// Read overrides from `vars` instead of the process environment
    #[must_use]
    pub fn with_environment(mut self, vars: config::Map<String, String>) -> Self {
        self.environment = Some(vars);
        self
    }
}

impl<F: FileSystem> ConfigLoader for Yaml<'_, F> {
    fn load_config(&self) -> Result<AppConfig, ConfigLoadError> {
        let config_paths = self.find_config_file_paths()?;

        if config_paths.len() > 1 {
            return Err(ConfigLoadError::MultipleFound(
                config_paths
                    .into_iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>(),
            ));
        }

        // Serde defaults fill in anything no source provides
        let mut builder = config::Config::builder();

        if let Some(config_path) = config_paths.first() {
            debug!("Loading configuration from {}", config_path.display());
            let file_contents = self.fs.read_file(config_path)?;
            builder = builder.add_source(config::File::from_str(&file_contents, FileFormat::Yaml));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(self.environment.clone()),
        );

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;

        app_config.inventory = self.fs.expand_path(&app_config.inventory);
        app_config.playbook = self.fs.expand_path(&app_config.playbook);
        app_config.credentials.private_key =
            self.fs.expand_path(&app_config.credentials.private_key);

        Ok(app_config)
    }

    fn find_config_file_paths(&self) -> Result<Vec<PathBuf>, crate::fs::FileSystemError> {
        let config_dir = self.fs.config_dir()?;

        let paths = ["config.yaml", "config.yml"]
            .into_iter()
            .map(|name| config_dir.join(name))
            .filter(|path| self.fs.path_exists(path))
            .collect();

        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{FileSystemError, MockFileSystem};
    use std::path::Path;

    const CONFIG_DIR: &str = "/home/test/.config/fleetops";

    fn fs_with_config(config_yaml: Option<&str>) -> MockFileSystem {
        let mut fs = MockFileSystem::default();
        let config_dir = Path::new(CONFIG_DIR);

        fs.mock_config_dir_ok(config_dir);
        fs.mock_path_exists(config_dir.join("config.yml"), false);
        fs.mock_expand_path_identity();

        match config_yaml {
            Some(yaml) => {
                let config_path = config_dir.join("config.yaml");
                fs.mock_path_exists(&config_path, true);
                fs.mock_read_file(config_path, yaml);
            }
            None => fs.mock_path_exists(config_dir.join("config.yaml"), false),
        }

        fs
    }

    fn no_env() -> config::Map<String, String> {
        config::Map::new()
    }

    mod find_config_file_paths {
        use super::*;

        #[test]
        fn test_find_config_paths() {
            let fs = fs_with_config(Some("target_group: api\n"));

            let paths = Yaml::new(&fs).find_config_file_paths().unwrap();

            assert_eq!(paths, vec![Path::new(CONFIG_DIR).join("config.yaml")]);
        }

        #[test]
        fn test_find_config_paths_none_present() {
            let fs = fs_with_config(None);

            let paths = Yaml::new(&fs).find_config_file_paths().unwrap();

            assert!(paths.is_empty());
        }

        #[test]
        fn test_find_config_paths_no_config_dir() {
            let mut fs = MockFileSystem::default();
            fs.expect_config_dir()
                .return_once(|| Err(FileSystemError::HomeDirNotFound));

            let result = Yaml::new(&fs).find_config_file_paths();

            assert!(matches!(result, Err(FileSystemError::HomeDirNotFound)));
        }
    }

    mod load_config {
        use super::*;

        #[test]
        fn test_load_config() {
            let yaml = r#"
                inventory: "/srv/ansible/hosts.ini"
                target_group: "api"
                service:
                  name: "epoch"
            "#;
            let fs = fs_with_config(Some(yaml));

            let config = Yaml::new(&fs)
                .with_environment(no_env())
                .load_config()
                .unwrap();

            assert_eq!(config.inventory(), Path::new("/srv/ansible/hosts.ini"));
            assert_eq!(config.target_group().as_str(), "api");
            assert_eq!(config.service().name(), "epoch");
            assert_eq!(config.service().health_port(), 33081);
        }

        #[test]
        fn test_load_config_without_file_uses_defaults() {
            let fs = fs_with_config(None);

            let config = Yaml::new(&fs)
                .with_environment(no_env())
                .load_config()
                .unwrap();

            assert_eq!(config.target_group().as_str(), "webservers");
            assert_eq!(config.backend(), "ansible");
            assert_eq!(config.service().name(), "rantoo");
        }

        #[test]
        fn test_environment_overrides_file() {
            let fs = fs_with_config(Some("target_group: api\n"));

            let mut env = no_env();
            env.insert("FLEETOPS_TARGET_GROUP".to_string(), "canary".to_string());
            env.insert(
                "FLEETOPS_CREDENTIALS__REMOTE_USER".to_string(),
                "ops".to_string(),
            );
            env.insert(
                "FLEETOPS_SERVICE__HEALTH_PORT".to_string(),
                "9000".to_string(),
            );

            let config = Yaml::new(&fs)
                .with_environment(env)
                .load_config()
                .unwrap();

            assert_eq!(config.target_group().as_str(), "canary");
            assert_eq!(config.credentials().remote_user(), "ops");
            assert_eq!(config.service().health_port(), 9000);
        }

        #[test]
        fn test_load_config_multiple_files() {
            let mut fs = MockFileSystem::default();
            let config_dir = Path::new(CONFIG_DIR);
            fs.mock_config_dir_ok(config_dir);
            fs.mock_path_exists(config_dir.join("config.yaml"), true);
            fs.mock_path_exists(config_dir.join("config.yml"), true);

            let result = Yaml::new(&fs).with_environment(no_env()).load_config();

            assert!(matches!(result, Err(ConfigLoadError::MultipleFound(paths)) if paths.len() == 2));
        }

        #[test]
        fn test_load_config_invalid_yaml() {
            let fs = fs_with_config(Some("inventory: [unclosed bracket"));

            let result = Yaml::new(&fs).with_environment(no_env()).load_config();

            assert!(matches!(result, Err(ConfigLoadError::ConfigError(_))));
        }

        #[test]
        fn test_load_config_expands_paths() {
            let mut fs = MockFileSystem::default();
            let config_dir = Path::new(CONFIG_DIR);
            fs.mock_config_dir_ok(config_dir);
            fs.mock_path_exists(config_dir.join("config.yaml"), false);
            fs.mock_path_exists(config_dir.join("config.yml"), false);
            fs.expect_expand_path().returning(|p| {
                let s = p.to_string_lossy();
                match s.strip_prefix("~/") {
                    Some(rest) => Path::new("/home/test").join(rest),
                    None => p.to_path_buf(),
                }
            });

            let config = Yaml::new(&fs)
                .with_environment(no_env())
                .load_config()
                .unwrap();

            assert_eq!(
                config.credentials().private_key(),
                Path::new("/home/test/.ssh/id_rsa")
            );
            assert_eq!(config.inventory(), Path::new("inventory/hosts.ini"));
        }
    }
}
