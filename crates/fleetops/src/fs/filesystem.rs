//! File system abstraction layer
//!
//! This module provides a trait-based abstraction for the few file system operations the
//! library needs: locating and reading the configuration file, expanding user paths, and
//! confirming that the inventory and playbook files can be read before any remote action.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use thiserror::Error;

/// Port for file system operations (Hexagonal Architecture)
///
/// All file system interactions in the fleetops library go through this abstraction.
#[cfg_attr(any(test, feature = "with_mocks"), mockall::automock)]
pub trait FileSystem: Send + Sync {
    /// Read a file and return its contents as a string
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] if:
    /// - The file does not exist
    /// - Permission is denied to read the file
    /// - The file content is not valid UTF-8
    fn read_file(&self, path: &Path) -> Result<String, FileSystemError>;

    /// Check if a path exists
    ///
    fn path_exists(&self, path: &Path) -> bool;

    /// Confirm that `path` exists and can be opened for reading
    ///
    /// Directories count as readable when their entries can be listed; Ansible accepts an
    /// inventory directory as well as a single file.
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] describing why the path cannot be read.
    fn check_readable(&self, path: &Path) -> Result<(), FileSystemError>;

    /// Expand a leading `~` to the user's home directory
    ///
    /// Paths that do not start with `~` are returned unchanged; the path does not need to
    /// exist.
    fn expand_path(&self, path: &Path) -> PathBuf;

    /// Get the fleetops configuration directory
    ///
    /// Honors `FLEETOPS_CONFIG_DIR`, otherwise follows platform conventions
    /// (e.g., `~/.config/fleetops` on Unix-like systems).
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError::HomeDirNotFound`] if the home directory cannot be determined.
    fn config_dir(&self) -> Result<PathBuf, FileSystemError>;
}

/// Errors that can occur during file system operations
#[derive(Error, Debug, Clone)]
pub enum FileSystemError {
    /// IO error occurred while touching `path`
    #[error("{}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    /// Home directory could not be determined
    #[error("Home directory not found")]
    HomeDirNotFound,
}

impl FileSystemError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::IoError {
            path: path.to_path_buf(),
            source: Arc::new(source),
        }
    }

    /// `true` when the underlying cause is a missing file or directory
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::IoError { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
impl MockFileSystem {
    /// Set up a mock for reading a file with specific content
    ///
    pub(crate) fn mock_read_file<P, S>(&mut self, path: P, content: S)
    where
        PathBuf: From<P>,
        S: ToString,
    {
        let path_buf = PathBuf::from(path);
        let content_string = content.to_string();
        self.expect_read_file()
            .with(mockall::predicate::eq(path_buf))
            .returning(move |_| Ok(content_string.clone()));
    }

    /// Set up a mock for path existence checking
    ///
    pub(crate) fn mock_path_exists<P>(&mut self, path: P, exists: bool)
    where
        PathBuf: From<P>,
    {
        self.expect_path_exists()
            .with(mockall::predicate::eq(PathBuf::from(path)))
            .returning(move |_| exists);
    }

    /// Set up a mock that reports `path` as readable
    ///
    pub(crate) fn mock_readable<P>(&mut self, path: P)
    where
        PathBuf: From<P>,
    {
        self.expect_check_readable()
            .with(mockall::predicate::eq(PathBuf::from(path)))
            .returning(|_| Ok(()));
    }

    /// Set up a mock that reports `path` as missing
    ///
    pub(crate) fn mock_missing<P>(&mut self, path: P)
    where
        PathBuf: From<P>,
    {
        let path = PathBuf::from(path);
        self.expect_check_readable()
            .with(mockall::predicate::eq(path))
            .returning(|p| {
                Err(FileSystemError::io(
                    p,
                    io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
                ))
            });
    }

    /// Set up a mock for getting the configuration directory
    ///
    pub(crate) fn mock_config_dir_ok<P>(&mut self, path: P)
    where
        PathBuf: From<P>,
    {
        let p = PathBuf::from(path);
        self.expect_config_dir().return_once(|| Ok(p));
    }

    /// Make `expand_path` the identity function
    ///
    pub(crate) fn mock_expand_path_identity(&mut self) {
        self.expect_expand_path().returning(Path::to_path_buf);
    }
}
