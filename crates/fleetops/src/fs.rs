//! File system abstractions

pub mod filesystem;
pub mod real;

pub use filesystem::{FileSystem, FileSystemError};
#[cfg(any(test, feature = "with_mocks"))]
pub use filesystem::MockFileSystem;
pub use real::RealFileSystem;
