//! In-memory workspace document store for testing.

use std::sync::{Arc, RwLock};

use groundwork_core::{
    application::{ApplicationError, ports::ConfigStore},
    domain::ConfigDocument,
    error::GroundworkResult,
};

/// In-memory document store. Clones share the same document.
#[derive(Debug, Clone)]
pub struct MemoryConfigStore {
    document: Arc<RwLock<ConfigDocument>>,
}

impl MemoryConfigStore {
    pub fn new(document: ConfigDocument) -> Self {
        Self {
            document: Arc::new(RwLock::new(document)),
        }
    }

    /// Snapshot the stored document (testing helper).
    pub fn document(&self) -> ConfigDocument {
        self.document
            .read()
            .expect("store lock poisoned")
            .clone()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> GroundworkResult<ConfigDocument> {
        self.document
            .read()
            .map(|d| d.clone())
            .map_err(|_| {
                ApplicationError::StoreLoad {
                    reason: "lock poisoned".into(),
                }
                .into()
            })
    }

    fn persist(&self, document: &ConfigDocument) -> GroundworkResult<()> {
        *self.document.write().map_err(|_| ApplicationError::StorePersist {
            reason: "lock poisoned".into(),
        })? = document.clone();
        Ok(())
    }
}
