//! Infrastructure adapters for Groundwork.
//!
//! This crate implements the ports defined in
//! `groundwork-core::application::ports`. It contains all external
//! dependencies and I/O operations.

pub mod builtin_templates;
pub mod config_store;
pub mod filesystem;
pub mod init;
pub mod template_loader;

// Re-export commonly used adapters
pub use config_store::{JsonConfigStore, MemoryConfigStore};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use init::NoopInitializer;
pub use template_loader::FilesystemTemplateLoader;
