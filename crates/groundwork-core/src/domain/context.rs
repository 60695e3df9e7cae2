//! Scaffold options and the template expansion context.
//!
//! `RawOptions` arrive pre-validated from the caller (the CLI or another
//! host). `NormalizedOptions` add the project root resolved from the
//! workspace document and are immutable from then on. `Context` is the
//! string-binding view of the normalized options that rules and the
//! template expander share by reference for the duration of one chain.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::common::{RelativePath, offset_from_root};

// ── EndpointType ─────────────────────────────────────────────────────────────

/// API endpoint type written into the deployment descriptor.
///
/// The value is passed through verbatim; Groundwork does not interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EndpointType {
    Regional,
    Edge,
    Private,
}

impl EndpointType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regional => "REGIONAL",
            Self::Edge => "EDGE",
            Self::Private => "PRIVATE",
        }
    }
}

impl fmt::Display for EndpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RawOptions ───────────────────────────────────────────────────────────────

/// Options as supplied by the caller, before the project root is resolved.
///
/// Provider and region are opaque strings: semantic validation is the
/// caller's job, not this engine's.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOptions {
    pub project: String,
    pub provider: String,
    pub region: String,
    pub endpoint_type: EndpointType,
    /// Skip the baseline formatting step during initialization.
    pub skip_format: bool,
    /// Enable the optional static pre-render step after scaffolding.
    pub prerender: bool,
    /// Replace existing files instead of failing on conflicting content.
    pub force: bool,
}

impl RawOptions {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            provider: "aws".into(),
            region: "us-east-1".into(),
            endpoint_type: EndpointType::Regional,
            skip_format: false,
            prerender: true,
            force: false,
        }
    }

    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn endpoint_type(mut self, endpoint_type: EndpointType) -> Self {
        self.endpoint_type = endpoint_type;
        self
    }

    pub fn skip_format(mut self, skip: bool) -> Self {
        self.skip_format = skip;
        self
    }

    pub fn prerender(mut self, prerender: bool) -> Self {
        self.prerender = prerender;
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

// ── NormalizedOptions ────────────────────────────────────────────────────────

/// Raw options plus the project root resolved from the workspace document.
///
/// Constructed once by the scaffold driver and never mutated afterwards;
/// every rule in a chain sees the same value.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedOptions {
    raw: RawOptions,
    project_root: RelativePath,
}

impl NormalizedOptions {
    pub fn new(raw: RawOptions, project_root: RelativePath) -> Self {
        Self { raw, project_root }
    }

    pub fn project(&self) -> &str {
        &self.raw.project
    }

    pub fn provider(&self) -> &str {
        &self.raw.provider
    }

    pub fn region(&self) -> &str {
        &self.raw.region
    }

    pub fn endpoint_type(&self) -> EndpointType {
        self.raw.endpoint_type
    }

    pub fn skip_format(&self) -> bool {
        self.raw.skip_format
    }

    pub fn prerender(&self) -> bool {
        self.raw.prerender
    }

    pub fn force(&self) -> bool {
        self.raw.force
    }

    /// The project's directory relative to the workspace root.
    pub fn project_root(&self) -> &RelativePath {
        &self.project_root
    }

    /// `dist/<project-root>` — where compiled output lands.
    pub fn dist_root(&self) -> RelativePath {
        RelativePath::new("dist").join(self.project_root.as_path())
    }

    /// A path inside the project directory.
    pub fn in_project(&self, segment: &str) -> RelativePath {
        self.project_root.join(segment)
    }
}

// ── Context ──────────────────────────────────────────────────────────────────

/// Resolved placeholder bindings for one scaffold run.
///
/// Read-only once built; rules and the template expander share it by
/// reference — there is no per-step copy.
///
/// ## Standard bindings
///
/// | Binding        | Example        | Source                        |
/// |----------------|----------------|-------------------------------|
/// | `project`      | `shop`         | options                       |
/// | `root`         | `apps/shop`    | workspace document            |
/// | `offset`       | `../../`       | computed from `root`          |
/// | `provider`     | `aws`          | options                       |
/// | `region`       | `us-east-1`    | options                       |
/// | `endpointType` | `REGIONAL`     | options                       |
/// | `tmpl`         | (empty)        | strips template-only suffixes |
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    bindings: BTreeMap<String, String>,
}

impl Context {
    /// Derive the standard bindings from normalized options.
    pub fn from_options(options: &NormalizedOptions) -> Self {
        let mut bindings = BTreeMap::new();
        bindings.insert("project".into(), options.project().to_string());
        bindings.insert("root".into(), options.project_root().to_string());
        bindings.insert("offset".into(), offset_from_root(options.project_root()));
        bindings.insert("provider".into(), options.provider().to_string());
        bindings.insert("region".into(), options.region().to_string());
        bindings.insert(
            "endpointType".into(),
            options.endpoint_type().as_str().to_string(),
        );
        // Expands to nothing so template files can carry a `${tmpl}` suffix
        // that keeps editors from parsing them as real source.
        bindings.insert("tmpl".into(), String::new());
        Self { bindings }
    }

    /// Add or replace a binding, consuming self.
    pub fn with_binding(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.bindings.insert(key.into(), value.into());
        self
    }

    /// Look up a binding.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.bindings.get(key).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> NormalizedOptions {
        NormalizedOptions::new(RawOptions::new("shop"), RelativePath::new("apps/shop"))
    }

    #[test]
    fn endpoint_type_display_is_uppercase() {
        assert_eq!(EndpointType::Regional.to_string(), "REGIONAL");
        assert_eq!(EndpointType::Edge.to_string(), "EDGE");
    }

    #[test]
    fn dist_root_nests_under_dist() {
        assert_eq!(
            options().dist_root().as_path(),
            std::path::Path::new("dist/apps/shop")
        );
    }

    #[test]
    fn context_standard_bindings() {
        let ctx = Context::from_options(&options());
        assert_eq!(ctx.get("project"), Some("shop"));
        assert_eq!(ctx.get("root"), Some("apps/shop"));
        assert_eq!(ctx.get("offset"), Some("../../"));
        assert_eq!(ctx.get("provider"), Some("aws"));
        assert_eq!(ctx.get("endpointType"), Some("REGIONAL"));
        assert_eq!(ctx.get("tmpl"), Some(""));
    }

    #[test]
    fn context_custom_binding() {
        let ctx = Context::from_options(&options()).with_binding("stage", "dev");
        assert_eq!(ctx.get("stage"), Some("dev"));
    }

    #[test]
    fn unknown_binding_is_none() {
        assert_eq!(Context::from_options(&options()).get("nope"), None);
    }
}
