//! Virtual file tree: staged writes that have not reached storage yet.
//!
//! Every rule in a chain mutates one shared [`FileTree`]. Nothing touches
//! persistent storage until the whole chain has succeeded and the driver
//! commits the staged writes through the `Filesystem` port. Discarding the
//! tree discards the run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::error::DomainError;

/// Read-only view of the real storage under the tree.
///
/// The tree probes existing files lazily through this trait so conflict
/// detection can compare staged content against what is actually on disk.
/// Adapters implement it; the [`EmptyBacking`] stand-in backs tests and
/// dry runs against a blank slate.
pub trait TreeBacking {
    /// Whether the path exists in real storage.
    fn exists(&self, path: &Path) -> bool;

    /// The current content of the path, if it exists and is readable.
    fn read(&self, path: &Path) -> Option<String>;
}

/// A backing with no pre-existing files.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyBacking;

impl TreeBacking for EmptyBacking {
    fn exists(&self, _path: &Path) -> bool {
        false
    }

    fn read(&self, _path: &Path) -> Option<String> {
        None
    }
}

/// In-memory staging area for pending file creations and overwrites.
///
/// Invariant: a path is staged at most once; staging it again with
/// different content requires explicit overwrite semantics. Conflict
/// detection keys off content alone, so create and overwrite stage the
/// same thing and only differ in whether existing content blocks them.
/// `BTreeMap` keeps pending writes in sorted path order so commit is
/// deterministic.
pub struct FileTree {
    backing: Box<dyn TreeBacking>,
    staged: BTreeMap<PathBuf, String>,
}

impl FileTree {
    pub fn new(backing: Box<dyn TreeBacking>) -> Self {
        Self {
            backing,
            staged: BTreeMap::new(),
        }
    }

    /// A tree over empty storage; useful for tests and pure dry runs.
    pub fn in_memory() -> Self {
        Self::new(Box::new(EmptyBacking))
    }

    /// Stage a file creation.
    ///
    /// Fails with [`DomainError::Conflict`] when the path already holds
    /// *different* staged or real content. Staging byte-identical content
    /// is a no-op, which is what makes re-running a generator over an
    /// already-scaffolded project safe.
    pub fn create(
        &mut self,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Result<(), DomainError> {
        let path = path.into();
        let content = content.into();

        if let Some(existing) = self.staged.get(&path) {
            if *existing == content {
                return Ok(());
            }
            return Err(DomainError::Conflict { path });
        }

        if self.backing.exists(&path) {
            match self.backing.read(&path) {
                Some(real) if real == content => {
                    // Already on disk with the same bytes; nothing to stage.
                    debug!(path = %path.display(), "create skipped, content unchanged");
                    return Ok(());
                }
                _ => return Err(DomainError::Conflict { path }),
            }
        }

        debug!(path = %path.display(), bytes = content.len(), "staged create");
        self.staged.insert(path, content);
        Ok(())
    }

    /// Stage an overwrite. Always succeeds, replacing any pending or real
    /// content for the path.
    pub fn overwrite(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        debug!(path = %path.display(), "staged overwrite");
        self.staged.insert(path, content.into());
    }

    /// Observe staged and real state without side effects.
    pub fn exists(&self, path: &Path) -> bool {
        self.staged.contains_key(path) || self.backing.exists(path)
    }

    /// Staged content for a path, if any.
    pub fn staged_content(&self, path: &Path) -> Option<&str> {
        self.staged.get(path).map(String::as_str)
    }

    /// Number of pending writes.
    pub fn pending_count(&self) -> usize {
        self.staged.len()
    }

    /// Pending paths in commit (sorted) order.
    pub fn pending_paths(&self) -> impl Iterator<Item = &Path> {
        self.staged.keys().map(|p| p.as_path())
    }

    /// Consume the tree into its pending writes, sorted by path.
    pub fn into_pending(self) -> Vec<(PathBuf, String)> {
        self.staged.into_iter().collect()
    }
}

impl std::fmt::Debug for FileTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileTree")
            .field("pending", &self.staged.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
