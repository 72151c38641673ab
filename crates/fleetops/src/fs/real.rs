// Real file system adapter implementation

use std::{
    fs,
    path::{Path, PathBuf},
};

use etcetera::{AppStrategy, AppStrategyArgs, choose_app_strategy};

use super::filesystem::{FileSystem, FileSystemError};

/// Environment variable that overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "FLEETOPS_CONFIG_DIR";

/// Real file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_file(&self, path: &Path) -> Result<String, FileSystemError> {
        fs::read_to_string(path).map_err(|e| FileSystemError::io(path, e))
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn check_readable(&self, path: &Path) -> Result<(), FileSystemError> {
        let metadata = fs::metadata(path).map_err(|e| FileSystemError::io(path, e))?;

        if metadata.is_dir() {
            fs::read_dir(path)
                .map(drop)
                .map_err(|e| FileSystemError::io(path, e))
        } else {
            fs::File::open(path)
                .map(drop)
                .map_err(|e| FileSystemError::io(path, e))
        }
    }

    fn expand_path(&self, path: &Path) -> PathBuf {
        let binding = path.to_string_lossy();
        let expanded = shellexpand::tilde(&binding);

        PathBuf::from(expanded.as_ref())
    }

    fn config_dir(&self) -> Result<PathBuf, FileSystemError> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        choose_app_strategy(AppStrategyArgs {
            top_level_domain: "io".to_string(),
            author: "fleetops".to_string(),
            app_name: "fleetops".to_string(),
        })
        .map(|xdg| xdg.config_dir())
        .map_err(|_| FileSystemError::HomeDirNotFound)
    }
}
