//! Domain layer: pure scaffolding logic with no I/O.
//!
//! Everything here is deterministic and side-effect free. Storage access
//! happens only behind the [`TreeBacking`] trait, which adapters implement.

pub mod common;
pub mod config;
pub mod context;
pub mod error;
pub mod template;
pub mod tree;

pub use common::{RelativePath, offset_from_root};
pub use config::{ConfigDocument, ProjectRecord, TaskDefinition};
pub use context::{Context, EndpointType, NormalizedOptions, RawOptions};
pub use error::{DomainError, ErrorCategory};
pub use template::{ExpandedFile, TemplateSource, expand};
pub use tree::{EmptyBacking, FileTree, TreeBacking};
