//! JSON-file workspace document store.

use std::path::PathBuf;

use tracing::{debug, instrument};

use groundwork_core::{
    application::{ApplicationError, ports::ConfigStore},
    domain::ConfigDocument,
    error::GroundworkResult,
};

/// Stores the workspace document as pretty-printed JSON at a fixed path.
///
/// Key order is preserved on round trip; unmodeled keys survive verbatim.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ConfigStore for JsonConfigStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> GroundworkResult<ConfigDocument> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| ApplicationError::StoreLoad {
            reason: format!("{}: {}", self.path.display(), e),
        })?;
        let document =
            serde_json::from_str(&raw).map_err(|e| ApplicationError::StoreLoad {
                reason: format!("{}: {}", self.path.display(), e),
            })?;
        debug!("workspace document loaded");
        Ok(document)
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn persist(&self, document: &ConfigDocument) -> GroundworkResult<()> {
        let mut rendered =
            serde_json::to_string_pretty(document).map_err(|e| ApplicationError::StorePersist {
                reason: e.to_string(),
            })?;
        rendered.push('\n');
        std::fs::write(&self.path, rendered).map_err(|e| ApplicationError::StorePersist {
            reason: format!("{}: {}", self.path.display(), e),
        })?;
        debug!("workspace document persisted");
        Ok(())
    }
}
