//! Initializer adapters implementing the `Initializer` port.

use tracing::{debug, info};

use groundwork_core::{
    application::ports::Initializer, domain::NormalizedOptions, error::GroundworkResult,
};

/// Initializer that records what it would do and returns.
///
/// Baseline workspace setup (dependency registration, formatting) is an
/// external collaborator; this adapter is the stand-in until one is wired
/// in. It still honors the options so callers exercise the full path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInitializer;

impl NoopInitializer {
    pub fn new() -> Self {
        Self
    }
}

impl Initializer for NoopInitializer {
    fn initialize(&self, options: &NormalizedOptions) -> GroundworkResult<()> {
        if options.skip_format() {
            debug!(project = options.project(), "skipping format baseline");
        }
        info!(project = options.project(), "workspace initialization done");
        Ok(())
    }
}
