pub mod yaml;

pub use self::yaml::Yaml;

use std::path::PathBuf;

use thiserror::Error;

use crate::{config::AppConfig, fs::FileSystemError};

/// Port for loading configuration from disk
///
pub trait ConfigLoader {
    /// Load configuration from standard locations
    ///
    /// A missing configuration file is not an error: built-in defaults apply.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError`] if the configuration directory cannot be determined, more
    /// than one configuration file exists, or the file cannot be read or parsed.
    fn load_config(&self) -> Result<AppConfig, ConfigLoadError>;

    /// Find the configuration files that exist in the configuration directory
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] if the configuration directory cannot be determined.
    fn find_config_file_paths(&self) -> Result<Vec<PathBuf>, FileSystemError>;
}

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error(transparent)]
    FileSystemError(#[from] FileSystemError),

    #[error("Multiple configuration files found: {}", .0.join(", "))]
    MultipleFound(Vec<String>),

    #[error(transparent)]
    ConfigError(#[from] ::config::ConfigError),
}

/// This trait allows for applying runtime CLI arguments on top of the configuration that the app
/// read from the config file.
///
pub trait ApplyToConfig {
    /// Implement this method such that the arguments in `args` are applied after/on top of the
    /// configuration that was loaded from the config file.
    ///
    fn apply_to_config(&self, config: AppConfig) -> AppConfig;
}
