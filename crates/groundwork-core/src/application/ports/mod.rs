//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `groundwork-adapters`
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by
//!   infrastructure
//!   - `Filesystem`: file operations, and the backing for staged trees
//!   - `ConfigStore`: workspace document load/persist
//!   - `Initializer`: baseline workspace setup before scaffolding
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by
//!   application (defined in the CLI layer, implemented by services)

pub mod output;

pub use output::{ConfigStore, Filesystem, Initializer};
