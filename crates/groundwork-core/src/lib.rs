//! Groundwork Core - scaffolding engine for monorepo workspaces.
//!
//! This crate provides the domain and application layers for Groundwork,
//! following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         groundwork-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          ScaffoldService                │
//! │  (normalize options, compose the rule   │
//! │   chain, stage / commit / persist)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Filesystem, ConfigStore, Initializer) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   groundwork-adapters (Infrastructure)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (FileTree, Context, TemplateSource,    │
//! │   ConfigDocument)                       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use groundwork_core::{
//!     application::ScaffoldService,
//!     domain::{EndpointType, RawOptions},
//! };
//!
//! let options = RawOptions::new("shop")
//!     .provider("aws")
//!     .region("us-east-1")
//!     .endpoint_type(EndpointType::Regional);
//!
//! // Adapters are injected; see groundwork-adapters.
//! let service = ScaffoldService::new(filesystem, store, initializer, app_templates, prerender_templates);
//! let plan = service.scaffold(options).unwrap();
//! let report = service.run(plan).unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Outcome, Rule, ScaffoldPlan, ScaffoldReport, ScaffoldService,
        ports::{ConfigStore, Filesystem, Initializer},
    };
    pub use crate::domain::{
        ConfigDocument, Context, EndpointType, FileTree, NormalizedOptions, ProjectRecord,
        RawOptions, RelativePath, TaskDefinition, TemplateSource, TreeBacking,
    };
    pub use crate::error::{GroundworkError, GroundworkResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
