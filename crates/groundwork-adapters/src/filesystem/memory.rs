//! In-memory filesystem adapter for testing.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use groundwork_core::{
    application::{ApplicationError, ports::Filesystem},
    error::GroundworkResult,
};

/// In-memory filesystem for testing.
///
/// Clones share storage, so a test can keep a handle for assertions while
/// the service owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    files: Arc<RwLock<BTreeMap<PathBuf, String>>>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a pre-existing file (testing helper).
    pub fn seed(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .write()
            .expect("filesystem lock poisoned")
            .insert(path.into(), content.into());
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.files.read().ok()?.get(path).cloned()
    }

    /// List all files in sorted order.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.files
            .read()
            .expect("filesystem lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .map(|files| files.contains_key(path))
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> GroundworkResult<String> {
        self.files
            .read()
            .ok()
            .and_then(|files| files.get(path).cloned())
            .ok_or_else(|| {
                ApplicationError::Filesystem {
                    path: path.to_path_buf(),
                    reason: "file not found".into(),
                }
                .into()
            })
    }

    fn write_file(&self, path: &Path, content: &str) -> GroundworkResult<()> {
        self.files
            .write()
            .map_err(|_| ApplicationError::Filesystem {
                path: path.to_path_buf(),
                reason: "lock poisoned".into(),
            })?
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();
        fs.write_file(Path::new("a.txt"), "x").unwrap();
        assert_eq!(other.read_file(Path::new("a.txt")), Some("x".to_string()));
    }

    #[test]
    fn seeded_files_are_visible_through_the_port() {
        let fs = MemoryFilesystem::new();
        fs.seed("apps/shop/serverless.yml", "service: shop\n");
        assert!(fs.exists(Path::new("apps/shop/serverless.yml")));
        assert_eq!(
            fs.read_to_string(Path::new("apps/shop/serverless.yml"))
                .unwrap(),
            "service: shop\n"
        );
    }
}
