//! Filesystem-based template loader.
//!
//! Loads a template pack from a directory tree. Every regular file under
//! the root becomes a [`TemplateSource`] whose path is relative to that
//! root, so packs are authored exactly the way the compiled-in set is:
//!
//! ```text
//! templates/
//! ├── handler.js${tmpl}
//! ├── tsconfig.serverless.json${tmpl}
//! └── assets/
//!     └── robots.txt
//! ```
//!
//! Files are returned in sorted path order so expansion and staging are
//! deterministic across runs.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use groundwork_core::{
    application::ApplicationError,
    domain::{RelativePath, TemplateSource},
    error::GroundworkResult,
};

/// Loads template sources from a directory on disk.
#[derive(Debug, Clone)]
pub struct FilesystemTemplateLoader {
    root: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load every file under the root as a template source.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load(&self) -> GroundworkResult<Vec<TemplateSource>> {
        if !self.root.is_dir() {
            return Err(ApplicationError::TemplateLoad {
                path: self.root.clone(),
                reason: "not a directory".into(),
            }
            .into());
        }

        let mut sources = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::TemplateLoad {
                path: self.root.clone(),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            sources.push(self.load_one(entry.path())?);
        }

        if sources.is_empty() {
            warn!("template directory contains no files");
        }
        debug!(count = sources.len(), "templates loaded");
        Ok(sources)
    }

    fn load_one(&self, path: &Path) -> GroundworkResult<TemplateSource> {
        let relative = path
            .strip_prefix(&self.root)
            .map_err(|e| ApplicationError::TemplateLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let content =
            std::fs::read_to_string(path).map_err(|e| ApplicationError::TemplateLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(TemplateSource::new(
            RelativePath::try_new(relative)?,
            content,
        ))
    }
}
