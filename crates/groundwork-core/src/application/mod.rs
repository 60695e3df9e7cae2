//! Application layer for Groundwork.
//!
//! This layer contains:
//! - **Services**: use case orchestration (ScaffoldService)
//! - **Rules**: the composition model scaffolding steps run under
//! - **Tasks**: builders for the injected task set
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! scaffolding logic itself. The tree, template and merge semantics live
//! in `crate::domain`.

pub mod error;
pub mod ports;
pub mod rule;
pub mod services;
pub mod tasks;

pub use services::{ScaffoldPlan, ScaffoldReport, ScaffoldService};

pub use rule::{Outcome, Rule};

// Re-export port traits (for adapter implementation)
pub use ports::{ConfigStore, Filesystem, Initializer};

pub use error::ApplicationError;
