//! Application services (use case orchestrators).

pub mod scaffold_service;

pub use scaffold_service::{ScaffoldPlan, ScaffoldReport, ScaffoldService};
