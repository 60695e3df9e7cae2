//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `groundwork-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{ConfigDocument, NormalizedOptions};
use crate::error::GroundworkResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `groundwork_adapters::filesystem::LocalFilesystem` (production)
/// - `groundwork_adapters::filesystem::MemoryFilesystem` (testing)
///
/// The scaffold driver also wraps this port as the read-only backing of
/// the staged [`FileTree`](crate::domain::FileTree), so conflict checks
/// see the same storage that commit writes to.
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a file to a string.
    fn read_to_string(&self, path: &Path) -> GroundworkResult<String>;

    /// Write content to a file, creating parent directories as needed.
    fn write_file(&self, path: &Path, content: &str) -> GroundworkResult<()>;
}

/// Port for workspace document storage.
///
/// Implemented by:
/// - `groundwork_adapters::config_store::JsonConfigStore` (production)
/// - `groundwork_adapters::config_store::MemoryConfigStore` (testing)
pub trait ConfigStore: Send + Sync {
    /// Load the workspace document.
    fn load(&self) -> GroundworkResult<ConfigDocument>;

    /// Persist the workspace document, replacing the stored copy.
    fn persist(&self, document: &ConfigDocument) -> GroundworkResult<()>;
}

/// Port for baseline workspace initialization.
///
/// Runs before any file is staged. Covers workspace-level setup that is
/// external to the scaffold itself (dependency registration, formatting
/// baseline). Implemented by:
/// - `groundwork_adapters::init::NoopInitializer`
pub trait Initializer: Send + Sync {
    /// Prepare the workspace for the project described by `options`.
    fn initialize(&self, options: &NormalizedOptions) -> GroundworkResult<()>;
}
