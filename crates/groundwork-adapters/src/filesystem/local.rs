//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use groundwork_core::{application::ports::Filesystem, error::GroundworkResult};

/// Production filesystem implementation using `std::fs`.
///
/// Staged paths are workspace-relative; the adapter anchors them at the
/// workspace root it was constructed with, so the binary can run from
/// anywhere.
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    /// Create a filesystem adapter anchored at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn read_to_string(&self, path: &Path) -> GroundworkResult<String> {
        std::fs::read_to_string(self.resolve(path)).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> GroundworkResult<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| map_io_error(path, e, "create directory"))?;
        }
        std::fs::write(&full, content).map_err(|e| map_io_error(path, e, "write file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> groundwork_core::error::GroundworkError {
    use groundwork_core::application::ApplicationError;

    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new(dir.path());

        fs.write_file(Path::new("apps/shop/serverless.yml"), "service: shop\n")
            .unwrap();

        assert!(fs.exists(Path::new("apps/shop/serverless.yml")));
        assert_eq!(
            fs.read_to_string(Path::new("apps/shop/serverless.yml"))
                .unwrap(),
            "service: shop\n"
        );
    }

    #[test]
    fn read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new(dir.path());
        assert!(fs.read_to_string(Path::new("nope.txt")).is_err());
        assert!(!fs.exists(Path::new("nope.txt")));
    }
}
