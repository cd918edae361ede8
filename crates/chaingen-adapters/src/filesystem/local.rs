//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use chaingen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{ChaingenError, ChaingenResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> ChaingenResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> ChaingenResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn remove_file(&self, path: &Path) -> ChaingenResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ChaingenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let dir = temp.path().join("build");
        let file = dir.join("conan_toolchain.cmake");

        fs.create_dir_all(&dir).unwrap();
        fs.write_file(&file, "first").unwrap();
        fs.write_file(&file, "second").unwrap();

        assert!(fs.exists(&file));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "second");
    }

    #[test]
    fn removes_written_file() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let file = temp.path().join("conan_project_include.cmake");

        fs.write_file(&file, "x").unwrap();
        fs.remove_file(&file).unwrap();

        assert!(!fs.exists(&file));
        assert!(fs.remove_file(&file).is_err());
    }

    #[test]
    fn write_into_missing_dir_fails() {
        let temp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .write_file(&temp.path().join("nope/file.cmake"), "x")
            .unwrap_err();
        assert!(matches!(
            err,
            ChaingenError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
